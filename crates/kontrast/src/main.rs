//! Kontrast CLI - RMS contrast per image for a whole directory tree.
//!
//! Every image under the input directory is converted to normalized
//! grayscale and reduced to its RMS contrast (standard deviation of the
//! intensities). The results land in one table sorted by file stem.
//!
//! # Usage
//!
//! ```bash
//! # Measure with default, repo-relative paths
//! kontrast
//!
//! # Explicit input and output directories
//! kontrast -i EWS/data/img/img_bin -o EWS/code/kontraste/rms_per_image
//!
//! # View configuration
//! kontrast config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Kontrast - RMS contrast per image, written as one table.
#[derive(Parser, Debug)]
#[command(name = "kontrast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "KONTRAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    measure: cli::measure::MeasureArgs,
}

/// Available commands. Without one, images are measured.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match (&cli.config, &cli.command) {
        // `config init` may be about to create the file.
        (Some(path), Some(Commands::Config(_))) if !path.exists() => {
            kontrast_core::Config::default()
        }
        (Some(path), _) => kontrast_core::Config::load_from(path)?,
        (None, _) => match kontrast_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `kontrast config path`."
                );
                kontrast_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("Kontrast v{}", kontrast_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, cli.config.as_deref()),
        None => cli::measure::execute(cli.measure, &config),
    }
}
