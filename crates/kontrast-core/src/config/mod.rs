//! Configuration management for kontrast.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, then combined with command-line and environment
//! overrides into a single immutable [`Settings`] value.

mod resolve;
mod types;
mod validate;

pub use resolve::{Overrides, Settings};
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input/output locations
    pub paths: PathsConfig,

    /// Discovery settings
    pub processing: ProcessingConfig,

    /// Result table settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.kontrast.kontrast/config.toml
    /// - Linux: ~/.config/kontrast/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\kontrast\config\config.toml
    ///
    /// Falls back to ~/.kontrast/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kontrast", "kontrast")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".kontrast").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.input_dir, PathBuf::from("EWS/data/img/img_bin"));
        assert_eq!(
            config.paths.output_dir,
            PathBuf::from("EWS/code/kontraste/rms_per_image")
        );
        assert_eq!(config.paths.output_file, "rms_per_file.csv");
        assert_eq!(config.output.preview_rows, 10);
        assert!(config.processing.case_sensitive);
    }

    #[test]
    fn test_default_formats() {
        let config = ProcessingConfig::default();
        assert_eq!(
            config.supported_formats,
            vec!["jpg", "jpeg", "png", "bmp", "tif", "tiff"]
        );
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("[output]"));
        // Unset repo root is left out rather than written as an empty value.
        assert!(!toml.contains("repo_root"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"jsonl\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.format, "jsonl");
        assert_eq!(config.output.preview_rows, 10);
        assert_eq!(config.paths.output_file, "rms_per_file.csv");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\nsupported_formats = []\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paths\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
