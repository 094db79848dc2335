//! Core data types: per-image measurements and the result table.

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{DecodeError, KontrastError, Result};

/// RMS contrast of one successfully processed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// File name without extension; the row identifier
    pub stem: String,

    /// Population standard deviation of the normalized grayscale map
    pub rms_contrast: f64,

    /// Source file
    #[serde(skip)]
    pub path: PathBuf,
}

/// Measurements ordered ascending by stem.
///
/// The sort is stable: rows sharing a stem keep their discovery order and
/// are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<Measurement>,
}

impl ResultTable {
    /// Sort `rows` by stem and wrap them.
    pub fn from_measurements(mut rows: Vec<Measurement>) -> Self {
        rows.sort_by(|a, b| a.stem.cmp(&b.stem));
        Self { rows }
    }

    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Measurement] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// A file skipped during the batch, with the reason.
#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: DecodeError,
}

/// Everything the batch loop produced, before the emptiness check.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of files the loop attempted
    pub attempted: usize,
    /// Successful measurements, in attempt order
    pub measurements: Vec<Measurement>,
    /// Skipped files, in attempt order
    pub failures: Vec<FailedFile>,
}

impl BatchReport {
    /// Sort the measurements into a table, handing back the failures.
    ///
    /// Fails with [`KontrastError::AllFilesFailed`] when nothing succeeded.
    pub fn finish(self) -> Result<(ResultTable, Vec<FailedFile>)> {
        if self.measurements.is_empty() {
            return Err(KontrastError::AllFilesFailed {
                attempted: self.attempted,
            });
        }
        Ok((
            ResultTable::from_measurements(self.measurements),
            self.failures,
        ))
    }
}
