// Python stub generation for the discovered lets-plot API surface
use crate::catalog::{is_complex, Category};
use crate::error::{Result, ScanError};
use crate::extract::{ApiSurface, IdentifierSet};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which flavor of Python stub to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubStyle {
    /// Wrapper written into the ggoat package by `autogen`.
    Wrapper,
    /// Template printed by `scan --stubs` for copy/paste.
    Template,
}

/// One generated Python definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedStub {
    pub category: Category,
    pub name: String,
    /// Set for names that need a hand-written wrapper.
    pub manual: bool,
}

impl GeneratedStub {
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        let name = name.into();
        let manual = is_complex(&name);
        Self {
            category,
            name,
            manual,
        }
    }

    pub fn qualified_name(&self) -> String {
        self.category.qualify(&self.name)
    }

    /// Python source for this definition. Every body raises
    /// `NotImplementedError` naming the qualified function.
    pub fn render(&self, style: StubStyle) -> String {
        let pyname = self.qualified_name();
        let (doc, message) = match style {
            StubStyle::Wrapper => (
                format!("Auto-generated wrapper for {} (lets-plot).", pyname),
                format!("Auto-generated: implement {}", pyname),
            ),
            StubStyle::Template => (
                format!("Stub for {} (auto-generated)", pyname),
                format!("Implement {} in ggoat", pyname),
            ),
        };

        let mut out = String::new();
        let _ = writeln!(out, "def {}(*args, **kwargs):", pyname);
        let _ = writeln!(out, "    \"\"\"{}\"\"\"", doc);
        if self.manual {
            let _ = writeln!(
                out,
                "    # TODO: manual implementation recommended for {} (complex case)",
                pyname
            );
        }
        let _ = writeln!(out, "    raise NotImplementedError('{}')", message);
        out
    }
}

/// Generated source for one category, stubs sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub category: Category,
    pub stubs: Vec<GeneratedStub>,
}

impl GeneratedArtifact {
    pub fn from_set(category: Category, names: &IdentifierSet) -> Self {
        let stubs = names
            .iter()
            .map(|name| GeneratedStub::new(category, name.as_str()))
            .collect();
        Self { category, stubs }
    }

    pub fn file_name(&self) -> String {
        self.category.artifact_file_name()
    }

    /// Full module text. No timestamps, so identical input renders
    /// byte-for-byte identical output.
    pub fn render(&self) -> String {
        let mut out = format!(
            "\"\"\"\nAuto-generated wrappers for lets-plot {}s\n\
             Do not edit manually. Regenerate with `letsplot-api autogen`.\n\"\"\"\n",
            self.category.tag()
        );
        for stub in &self.stubs {
            out.push('\n');
            out.push_str(&stub.render(StubStyle::Wrapper));
        }
        out
    }
}

/// Build one artifact per catalog category, empty categories included.
pub fn build_artifacts(surface: &ApiSurface) -> Vec<GeneratedArtifact> {
    surface
        .iter()
        .map(|(category, names)| GeneratedArtifact::from_set(category, names))
        .collect()
}

/// A file produced by [`write_artifacts`].
#[derive(Debug, Clone, Serialize)]
pub struct WrittenArtifact {
    pub category: Category,
    pub path: PathBuf,
    pub functions: usize,
}

/// Write every artifact under `out_dir`, creating it if needed.
///
/// Existing files are overwritten. On a write failure, files already
/// written by this call stay in place.
pub fn write_artifacts(
    out_dir: &Path,
    artifacts: &[GeneratedArtifact],
) -> Result<Vec<WrittenArtifact>> {
    fs::create_dir_all(out_dir).map_err(|source| ScanError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = out_dir.join(artifact.file_name());
        fs::write(&path, artifact.render()).map_err(|source| ScanError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} stubs)", path.display(), artifact.stubs.len());
        written.push(WrittenArtifact {
            category: artifact.category,
            path,
            functions: artifact.stubs.len(),
        });
    }

    info!("Generated {} artifacts in {}", written.len(), out_dir.display());
    Ok(written)
}
