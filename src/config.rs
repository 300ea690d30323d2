// Run configuration for the autogen and scan commands
use std::path::PathBuf;

/// Bundle location, relative to the ggoat repository root.
pub const BUNDLE_PATH: &str = "src/ggoat/assets/lets-plot.min.js";

/// Default destination of generated wrapper modules.
pub const DEFAULT_OUT_DIR: &str = "src/ggoat/autogen";

#[derive(Debug, Clone)]
pub struct AutogenConfig {
    pub bundle_path: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for AutogenConfig {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(BUNDLE_PATH),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl AutogenConfig {
    pub fn with_out_dir(mut self, out_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = out_dir {
            self.out_dir = dir;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub bundle_path: PathBuf,
    /// Emit stub definitions after the report.
    pub stubs: bool,
    /// Wrapper package to diff against.
    pub package: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(BUNDLE_PATH),
            stubs: false,
            package: None,
        }
    }
}
