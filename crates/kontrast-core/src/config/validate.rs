//! Configuration validation.

use crate::error::ConfigError;
use crate::output::OutputFormat;

use super::Config;

impl Config {
    /// Validate configuration values before any path is touched.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self
            .processing
            .supported_formats
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats entries must be bare extensions like \"png\"".into(),
            ));
        }
        validate_output_file(&self.paths.output_file)?;
        if OutputFormat::parse(&self.output.format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be \"csv\" or \"jsonl\", got {:?}",
                self.output.format
            )));
        }
        Ok(())
    }
}

/// The table file name must be a bare name inside the output directory.
pub(crate) fn validate_output_file(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "paths.output_file must not be empty".into(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::ValidationError(format!(
            "paths.output_file must be a file name, not a path: {name:?}"
        )));
    }
    Ok(())
}
