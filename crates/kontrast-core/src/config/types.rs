//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where images are read from and where the table is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root that relative input/output paths are resolved against.
    /// Unset means the current working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_root: Option<PathBuf>,

    /// Image directory, searched recursively
    pub input_dir: PathBuf,

    /// Directory the result table is written into (created if absent)
    pub output_dir: PathBuf,

    /// File name of the result table inside `output_dir`
    pub output_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            repo_root: None,
            input_dir: PathBuf::from("EWS/data/img/img_bin"),
            output_dir: PathBuf::from("EWS/code/kontraste/rms_per_image"),
            output_file: "rms_per_file.csv".to_string(),
        }
    }
}

/// Discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// File extensions treated as candidate images
    pub supported_formats: Vec<String>,

    /// Match extensions exactly (`photo.PNG` is skipped when true)
    pub case_sensitive: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "bmp".to_string(),
                "tif".to_string(),
                "tiff".to_string(),
            ],
            case_sensitive: true,
        }
    }
}

/// Result table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table format: "csv" or "jsonl"
    pub format: String,

    /// Add `file_image`, `mask` and `label` columns
    pub extra_columns: bool,

    /// Number of rows echoed to stdout after a run
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            extra_columns: false,
            preview_rows: 10,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
