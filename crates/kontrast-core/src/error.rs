//! Error types for the contrast measurement pipeline.
//!
//! Errors are split by how far they reach: [`DecodeError`] stays inside the
//! batch loop (the file is skipped), everything in [`KontrastError`] ends the
//! run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a measurement run.
#[derive(Error, Debug)]
pub enum KontrastError {
    /// Configuration could not be loaded or resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discovery found no candidate image files
    #[error("No images found in: {}", dir.display())]
    NoImagesFound { dir: PathBuf },

    /// Every candidate file failed to decode or measure
    #[error("No evaluable images: all {attempted} candidate file(s) failed")]
    AllFilesFailed { attempted: usize },

    /// Writing the result table failed
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// An input or output path could not be resolved or created
    #[error("Cannot resolve {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single image could not be turned into a grayscale map.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file could not be read
    #[error("unreadable file: {0}")]
    Read(#[from] std::io::Error),

    /// The file content is not a decodable image
    #[error("corrupt image data: {0}")]
    Corrupt(String),

    /// The pixel array has a layout that cannot be reduced to one channel
    #[error("Unsupported image shape: {shape:?}")]
    UnsupportedShape { shape: Vec<usize> },

    /// The image decoded to zero pixels
    #[error("image has no pixels")]
    Empty,
}

/// Convenience type alias for run-level results.
pub type Result<T> = std::result::Result<T, KontrastError>;
