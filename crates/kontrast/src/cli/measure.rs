//! The default command: measure every image and write the table.

use clap::{Args, ValueEnum};
use kontrast_core::output::render_preview;
use kontrast_core::{Config, Kontrast, OutputFormat, Overrides, Settings};
use std::path::PathBuf;

/// Arguments for measuring a directory.
#[derive(Args, Debug, Default)]
pub struct MeasureArgs {
    /// Image directory, searched recursively (repo-relative or absolute)
    #[arg(short, long, env = "EWS_INPUT_DIR")]
    pub input: Option<PathBuf>,

    /// Output directory (repo-relative or absolute); created if missing
    #[arg(short, long, env = "EWS_OUT_DIR")]
    pub out: Option<PathBuf>,

    /// File name of the result table inside the output directory
    #[arg(long = "per-file-csv")]
    pub per_file_csv: Option<String>,

    /// Root for relative paths (defaults to the current directory)
    #[arg(long, env = "EWS_REPO_ROOT")]
    pub repo_root: Option<PathBuf>,

    /// Table format
    #[arg(short, long, value_enum)]
    pub format: Option<TableFormat>,

    /// Add file_image, mask and label columns (`--extra-columns=false` turns them off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub extra_columns: Option<bool>,

    /// Number of rows to preview on stdout
    #[arg(long)]
    pub preview: Option<usize>,
}

/// Supported table formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TableFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<TableFormat> for OutputFormat {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Csv => OutputFormat::Csv,
            TableFormat::Jsonl => OutputFormat::JsonLines,
        }
    }
}

impl MeasureArgs {
    /// Command-line values as config overrides; unset flags defer to the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            repo_root: self.repo_root.clone(),
            input_dir: self.input.clone(),
            output_dir: self.out.clone(),
            output_file: self.per_file_csv.clone(),
            format: self.format.map(OutputFormat::from),
            extra_columns: self.extra_columns,
            preview_rows: self.preview,
        }
    }
}

/// Execute a measurement run.
pub fn execute(args: MeasureArgs, config: &Config) -> anyhow::Result<()> {
    let settings = Settings::resolve(config, args.overrides())?;
    tracing::info!("Repo root: {}", settings.repo_root.display());
    tracing::info!("Input    : {}", settings.input_dir.display());
    tracing::info!("Output   : {}", settings.output_dir.display());

    let preview_rows = settings.preview_rows;
    let runner = Kontrast::new(settings);
    let files = runner.discover()?;

    let start_time = std::time::Instant::now();
    let progress = create_progress_bar(files.len() as u64);
    let outcome = runner.measure_and_write(&files, |file| {
        progress.set_message(file.file_name());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let outcome = outcome?;

    print_summary(
        outcome.table.len(),
        outcome.failures.len(),
        start_time.elapsed(),
    );

    println!("Saved RMS table: {}", outcome.output_path.display());
    print!("{}", render_preview(&outcome.table, preview_rows));
    Ok(())
}

fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb
}

/// Print a short summary after the batch.
fn print_summary(measured: usize, failed: usize, elapsed: std::time::Duration) {
    eprintln!();
    eprintln!("    Measured:     {:>8}", measured);
    if failed > 0 {
        eprintln!("    Skipped:      {:>8}", failed);
    }
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
}
