use anyhow::Result;
use clap::{Parser, Subcommand};
use letsplot_api::cli_output::{OutputMode, OutputWriter};
use letsplot_api::{run_autogen, run_scan, AutogenConfig, ScanConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "letsplot-api")]
#[command(about = "Scan lets-plot.min.js and keep ggoat's Python wrappers in sync", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: human on a terminal, plain otherwise)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one Python wrapper module per API category
    Autogen {
        /// Output directory (default: src/ggoat/autogen)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print a coverage report of the API found in the bundle
    Scan {
        /// Also print Python stub definitions
        #[arg(long)]
        stubs: bool,

        /// ggoat package directory to diff the scanned API against
        #[arg(long)]
        package: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for reports and stubs
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let writer = cli
        .format
        .map(OutputWriter::new)
        .unwrap_or_else(OutputWriter::auto);

    match cli.command {
        Commands::Autogen { out } => {
            let config = AutogenConfig::default().with_out_dir(out);
            debug!("{:?}", config);

            let written = run_autogen(&config)?;
            writer.autogen_summary(&config.out_dir, &written)?;

            Ok(())
        }

        Commands::Scan { stubs, package } => {
            let config = ScanConfig {
                stubs,
                package,
                ..ScanConfig::default()
            };
            debug!("{:?}", config);

            let outcome = run_scan(&config)?;
            let report = outcome.report();

            if writer.mode() == OutputMode::Json {
                writer.emit_json(&report.to_json(config.stubs))?;
            } else {
                writer.text(&report.render(writer.is_human()));
                if config.stubs {
                    writer.text(&report.render_stubs());
                }
            }

            Ok(())
        }
    }
}
