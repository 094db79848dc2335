//! Kontrast Core - per-image RMS contrast measurement.
//!
//! Every image in a directory tree is reduced to one number, the population
//! standard deviation of its normalized grayscale intensities, and the
//! results are written as one flat table.
//!
//! # Architecture
//!
//! ```text
//! Discover → Decode → Normalize to [0,1] gray → RMS contrast → Sort by stem → CSV
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use kontrast_core::{Config, Kontrast, Overrides, Settings};
//!
//! fn main() -> kontrast_core::Result<()> {
//!     let config = Config::load()?;
//!     let settings = Settings::resolve(&config, Overrides::default())?;
//!     let outcome = Kontrast::new(settings).run()?;
//!     println!("{} rows in {:?}", outcome.table.len(), outcome.output_path);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod labels;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, Overrides, Settings};
pub use error::{ConfigError, DecodeError, KontrastError, Result};
pub use labels::LabelMask;
pub use math::rms_contrast;
pub use output::{OutputFormat, TableWriter};
pub use pipeline::{ContrastProcessor, DiscoveredFile};
pub use types::{BatchReport, FailedFile, Measurement, ResultTable};

use std::path::PathBuf;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// The written table, sorted by stem
    pub table: ResultTable,
    /// Files that were skipped, with reasons
    pub failures: Vec<FailedFile>,
    /// Where the table was written
    pub output_path: PathBuf,
}

/// Batch runner - the main entry point for a measurement run.
pub struct Kontrast {
    settings: Settings,
    processor: ContrastProcessor,
}

impl Kontrast {
    /// Create a runner for resolved settings.
    pub fn new(settings: Settings) -> Self {
        let processor = ContrastProcessor::new(&settings.processing);
        Self {
            settings,
            processor,
        }
    }

    /// Discover candidate images, failing when there are none.
    pub fn discover(&self) -> Result<Vec<DiscoveredFile>> {
        let files = self.processor.discover(&self.settings.input_dir);
        if files.is_empty() {
            return Err(KontrastError::NoImagesFound {
                dir: self.settings.input_dir.clone(),
            });
        }
        tracing::info!("Found {} image(s) to measure", files.len());
        Ok(files)
    }

    /// Measure `files`, then sort and write the table.
    ///
    /// `on_file` runs after each file is attempted, successful or not.
    pub fn measure_and_write<F>(
        &self,
        files: &[DiscoveredFile],
        on_file: F,
    ) -> Result<RunOutcome>
    where
        F: FnMut(&DiscoveredFile),
    {
        let (table, failures) = self.processor.process_batch(files, on_file).finish()?;

        let output_path = self.settings.output_path.clone();
        output::write_table_file(
            &output_path,
            &table,
            self.settings.format,
            self.settings.extra_columns,
        )?;
        tracing::info!("Wrote {} row(s) to {:?}", table.len(), output_path);

        Ok(RunOutcome {
            table,
            failures,
            output_path,
        })
    }

    /// Discover, measure and write in one call.
    pub fn run(&self) -> Result<RunOutcome> {
        let files = self.discover()?;
        self.measure_and_write(&files, |_| {})
    }
}
