// Mode-aware CLI output for the scan and autogen commands
use crate::codegen::WrittenArtifact;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::path::Path;

/// Output mode for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-friendly output with colors
    Human,
    /// Machine-readable JSON output
    Json,
    /// Plain text without colors (for pipes/logs)
    Plain,
}

impl OutputMode {
    /// Plain when stdout is piped or redirected, human otherwise
    pub fn auto() -> Self {
        if io::stdout().is_terminal() {
            Self::Human
        } else {
            Self::Plain
        }
    }
}

/// Summary of one `autogen` run, as emitted in JSON mode
#[derive(Debug, Serialize)]
pub struct AutogenSummary<'a> {
    pub out_dir: &'a Path,
    pub artifacts: &'a [WrittenArtifact],
}

/// CLI output writer with mode awareness
pub struct OutputWriter {
    mode: OutputMode,
}

impl OutputWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn auto() -> Self {
        Self::new(OutputMode::auto())
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Whether text output should carry ANSI colors
    pub fn is_human(&self) -> bool {
        matches!(self.mode, OutputMode::Human)
    }

    /// Print pre-rendered text as is. Ignored in JSON mode.
    pub fn text(&self, text: &str) {
        if !matches!(self.mode, OutputMode::Json) {
            print!("{}", text);
        }
    }

    /// Emit a structured document (JSON mode only)
    pub fn emit_json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        if matches!(self.mode, OutputMode::Json) {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    /// Print the header and one summary row per generated artifact: a table
    /// in human mode, `- <path> : <n> functions generated` lines in plain mode
    pub fn autogen_summary(
        &self,
        out_dir: &Path,
        artifacts: &[WrittenArtifact],
    ) -> serde_json::Result<()> {
        match self.mode {
            OutputMode::Human => {
                println!("{}", "# lets-plot API auto-generation".cyan().bold());
                println!("# Output directory: {}\n", out_dir.display());
                println!("{}", summary_table(artifacts));
            }
            OutputMode::Plain => print!("{}", render_summary(out_dir, artifacts)),
            OutputMode::Json => self.emit_json(&AutogenSummary { out_dir, artifacts })?,
        }
        Ok(())
    }
}

/// Plain-text autogen summary: header, then `- <path> : <n> functions generated`
pub fn render_summary(out_dir: &Path, artifacts: &[WrittenArtifact]) -> String {
    let mut out = format!(
        "# lets-plot API auto-generation\n# Output directory: {}\n\n",
        out_dir.display()
    );
    for artifact in artifacts {
        out.push_str(&format!(
            "- {} : {} functions generated\n",
            artifact.path.display(),
            artifact.functions
        ));
    }
    out
}

fn summary_table(artifacts: &[WrittenArtifact]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "File", "Functions"]);
    for artifact in artifacts {
        table.add_row(vec![
            Cell::new(artifact.category.tag()),
            Cell::new(artifact.path.display()),
            Cell::new(artifact.functions),
        ]);
    }
    table
}
