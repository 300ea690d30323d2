//! Scan the minified lets-plot bundle for its public API surface and keep
//! ggoat's Python wrappers in sync with it.
//!
//! The scan is a regex heuristic over raw text. It relies on the bundle
//! keeping readable function names; a bundle with mangled identifiers
//! silently yields (almost) nothing.

pub mod catalog;
pub mod cli_output;
pub mod codegen;
pub mod config;
pub mod coverage;
pub mod error;
pub mod extract;
pub mod report;

pub use catalog::{Category, MatchRule, COMPLEX};
pub use codegen::{GeneratedArtifact, GeneratedStub, StubStyle, WrittenArtifact};
pub use config::{AutogenConfig, ScanConfig};
pub use error::{Result, ScanError};
pub use extract::{ApiSurface, IdentifierSet};

use std::collections::BTreeMap;

/// Scan the bundle and write one wrapper module per category.
pub fn run_autogen(config: &AutogenConfig) -> Result<Vec<WrittenArtifact>> {
    let source = extract::load_bundle(&config.bundle_path)?;
    let surface = ApiSurface::scan(&source);
    let artifacts = codegen::build_artifacts(&surface);
    codegen::write_artifacts(&config.out_dir, &artifacts)
}

/// Result of a scan run, ready to be rendered by [`report::CoverageReport`].
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub surface: ApiSurface,
    pub missing: Option<BTreeMap<Category, IdentifierSet>>,
}

impl ScanOutcome {
    pub fn report(&self) -> report::CoverageReport<'_> {
        let report = report::CoverageReport::new(&self.surface);
        match &self.missing {
            Some(missing) => report.with_missing(missing.clone()),
            None => report,
        }
    }
}

/// Scan the bundle and, when configured, diff it against the wrapper package.
pub fn run_scan(config: &ScanConfig) -> Result<ScanOutcome> {
    let source = extract::load_bundle(&config.bundle_path)?;
    let surface = ApiSurface::scan(&source);
    let missing = match &config.package {
        Some(dir) => {
            let index = coverage::PackageIndex::load(dir)?;
            Some(coverage::missing(&surface, &index))
        }
        None => None,
    };
    Ok(ScanOutcome { surface, missing })
}
