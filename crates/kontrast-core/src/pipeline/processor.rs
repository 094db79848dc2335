//! Pipeline orchestration: discovery, per-file measurement and the batch loop.

use std::path::Path;

use crate::config::ProcessingConfig;
use crate::error::DecodeError;
use crate::math::rms_contrast;
use crate::types::{BatchReport, FailedFile, Measurement};

use super::decode::decode_gray01;
use super::discovery::{DiscoveredFile, FileDiscovery};

/// Measures RMS contrast for discovered image files.
pub struct ContrastProcessor {
    discovery: FileDiscovery,
}

impl ContrastProcessor {
    /// Create a processor with the given discovery settings.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            discovery: FileDiscovery::new(config.clone()),
        }
    }

    /// Discover all candidate image files under `root`.
    pub fn discover(&self, root: &Path) -> Vec<DiscoveredFile> {
        self.discovery.discover(root)
    }

    /// Decode one file and compute its RMS contrast.
    pub fn measure(&self, file: &DiscoveredFile) -> Result<Measurement, DecodeError> {
        let start = std::time::Instant::now();
        let gray = decode_gray01(&file.path)?;
        let rms = rms_contrast(&gray);
        tracing::debug!(
            "Measured {:?} in {:?} ({}x{}): {:.6}",
            file.path,
            start.elapsed(),
            gray.ncols(),
            gray.nrows(),
            rms
        );

        Ok(Measurement {
            stem: file.stem.clone(),
            rms_contrast: rms,
            path: file.path.clone(),
        })
    }

    /// Measure every file in order. Failures are logged and recorded, never
    /// propagated; `on_file` runs after each attempt.
    pub fn process_batch<F>(&self, files: &[DiscoveredFile], mut on_file: F) -> BatchReport
    where
        F: FnMut(&DiscoveredFile),
    {
        let mut report = BatchReport {
            attempted: files.len(),
            ..Default::default()
        };

        for file in files {
            match self.measure(file) {
                Ok(measurement) => report.measurements.push(measurement),
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", file.file_name(), error);
                    report.failures.push(FailedFile {
                        path: file.path.clone(),
                        error,
                    });
                }
            }
            on_file(file);
        }

        tracing::info!(
            "Measured {} image(s), skipped {}",
            report.measurements.len(),
            report.failures.len()
        );
        report
    }
}
