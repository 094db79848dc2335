//! Turning a [`Config`] plus overrides into resolved, absolute run settings.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::output::OutputFormat;

use super::validate::validate_output_file;
use super::{Config, ProcessingConfig};

/// Values supplied on the command line or through the environment.
///
/// Every field left as `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo_root: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub format: Option<OutputFormat>,
    pub extra_columns: Option<bool>,
    pub preview_rows: Option<usize>,
}

/// Fully resolved settings for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Absolute root that relative paths were resolved against
    pub repo_root: PathBuf,
    /// Absolute image directory (may not exist; discovery reports that)
    pub input_dir: PathBuf,
    /// Absolute output directory, guaranteed to exist
    pub output_dir: PathBuf,
    /// Full path of the table file inside `output_dir`
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub extra_columns: bool,
    pub preview_rows: usize,
    pub processing: ProcessingConfig,
}

impl Settings {
    /// Merge `overrides` over `config`, resolve every path and create the
    /// output directory.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Resolve {
            path: PathBuf::from("."),
            source,
        })?;

        let repo_root = overrides
            .repo_root
            .or_else(|| config.paths.repo_root.clone())
            .map(|root| resolve_against(&cwd, &root))
            .unwrap_or_else(|| cwd.clone());

        let input_dir = overrides
            .input_dir
            .unwrap_or_else(|| config.paths.input_dir.clone());
        let input_dir = normalize(resolve_against(&repo_root, &input_dir));

        let output_dir = overrides
            .output_dir
            .unwrap_or_else(|| config.paths.output_dir.clone());
        let output_dir = resolve_against(&repo_root, &output_dir);
        std::fs::create_dir_all(&output_dir).map_err(|source| ConfigError::Resolve {
            path: output_dir.clone(),
            source,
        })?;
        let output_dir = normalize(output_dir);

        let output_file = overrides
            .output_file
            .unwrap_or_else(|| config.paths.output_file.clone());
        validate_output_file(&output_file)?;
        let output_path = output_dir.join(&output_file);

        let format = match overrides.format {
            Some(format) => format,
            None => OutputFormat::parse(&config.output.format).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "output.format must be \"csv\" or \"jsonl\", got {:?}",
                    config.output.format
                ))
            })?,
        };

        Ok(Self {
            repo_root,
            input_dir,
            output_dir,
            output_path,
            format,
            extra_columns: overrides
                .extra_columns
                .unwrap_or(config.output.extra_columns),
            preview_rows: overrides
                .preview_rows
                .unwrap_or(config.output.preview_rows),
            processing: config.processing.clone(),
        })
    }
}

/// Expand `~` and anchor relative paths at `root`.
fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&path_str).into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

/// Canonicalize when the path exists, otherwise keep it as given.
fn normalize(path: PathBuf) -> PathBuf {
    std::fs::canonicalize(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides_in(root: &Path) -> Overrides {
        Overrides {
            repo_root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_relative_paths_resolve_against_repo_root() {
        let root = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(&Config::default(), overrides_in(root.path())).unwrap();

        let root = std::fs::canonicalize(root.path()).unwrap();
        assert!(settings.input_dir.ends_with("EWS/data/img/img_bin"));
        assert_eq!(
            settings.output_dir,
            root.join("EWS/code/kontraste/rms_per_image")
        );
        assert_eq!(
            settings.output_path,
            settings.output_dir.join("rms_per_file.csv")
        );
    }

    #[test]
    fn test_output_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            output_dir: Some(PathBuf::from("out/nested")),
            ..overrides_in(root.path())
        };
        let settings = Settings::resolve(&Config::default(), overrides).unwrap();
        assert!(settings.output_dir.is_dir());
    }

    #[test]
    fn test_absolute_override_ignores_repo_root() {
        let root = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            input_dir: Some(elsewhere.path().to_path_buf()),
            ..overrides_in(root.path())
        };
        let settings = Settings::resolve(&Config::default(), overrides).unwrap();
        assert_eq!(
            settings.input_dir,
            std::fs::canonicalize(elsewhere.path()).unwrap()
        );
    }

    #[test]
    fn test_overrides_win_over_config() {
        let root = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.extra_columns = false;
        config.output.preview_rows = 10;
        let overrides = Overrides {
            output_file: Some("custom.jsonl".to_string()),
            format: Some(OutputFormat::JsonLines),
            extra_columns: Some(true),
            preview_rows: Some(3),
            ..overrides_in(root.path())
        };
        let settings = Settings::resolve(&config, overrides).unwrap();
        assert!(settings.output_path.ends_with("custom.jsonl"));
        assert_eq!(settings.format, OutputFormat::JsonLines);
        assert!(settings.extra_columns);
        assert_eq!(settings.preview_rows, 3);
    }

    #[test]
    fn test_rejects_output_file_with_separator() {
        let root = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            output_file: Some("../escape.csv".to_string()),
            ..overrides_in(root.path())
        };
        let err = Settings::resolve(&Config::default(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unwritable_output_dir_is_a_resolve_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let overrides = Overrides {
            output_dir: Some(blocker.join("out")),
            ..overrides_in(root.path())
        };
        let err = Settings::resolve(&Config::default(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Resolve { .. }));
    }
}
