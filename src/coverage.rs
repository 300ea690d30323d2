// Diff the scanned API surface against what the ggoat package already defines
use crate::catalog::Category;
use crate::error::{Result, ScanError};
use crate::extract::{decode_lenient, ApiSurface, IdentifierSet};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

lazy_static! {
    // Module-level definitions only; methods are indented.
    static ref DEF_PATTERN: Regex =
        Regex::new(r"(?m)^def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("def pattern must compile");
}

const GENERATED_SUFFIX: &str = "_autogen.py";

/// Top-level function names defined across a Python package.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    defined: BTreeSet<String>,
    files: usize,
}

impl PackageIndex {
    /// Index every hand-written `*.py` file under `dir`. Generated
    /// `*_autogen.py` modules are skipped so their stubs don't hide gaps.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ScanError::PackageNotFound(dir.to_path_buf()));
        }

        let mut index = Self::default();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !entry.file_type().is_file() || !file_name.ends_with(".py") {
                continue;
            }
            if file_name.ends_with(GENERATED_SUFFIX) {
                debug!("Skipping generated module {}", path.display());
                continue;
            }

            let bytes = fs::read(path).map_err(|source| ScanError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            index.add_source(&decode_lenient(&bytes));
            index.files += 1;
        }

        info!(
            "Indexed {} definitions from {} modules in {}",
            index.defined.len(),
            index.files,
            dir.display()
        );
        Ok(index)
    }

    pub fn add_source(&mut self, source: &str) {
        self.defined.extend(
            DEF_PATTERN
                .captures_iter(source)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        );
    }

    pub fn defines(&self, name: &str) -> bool {
        self.defined.contains(name)
    }
}

/// Per category, the scanned names whose `<tag>_<name>` wrapper the package
/// doesn't define yet. Every catalog category is present.
pub fn missing(surface: &ApiSurface, index: &PackageIndex) -> BTreeMap<Category, IdentifierSet> {
    surface
        .iter()
        .map(|(category, names)| {
            let gaps: IdentifierSet = names
                .iter()
                .filter(|name| !index.defines(&category.qualify(name)))
                .map(String::as_str)
                .collect();
            (category, gaps)
        })
        .collect()
}
