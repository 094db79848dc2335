//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Discovers image files in directories.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

/// A candidate image found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File name without directory or extension; the row identifier
    pub stem: String,
}

impl DiscoveredFile {
    /// Build a reference from a path, deriving its stem.
    pub fn new(path: PathBuf) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    /// File name with extension, used in log messages and the `file_image` column.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.stem.clone())
    }
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Recursively find all supported image files under `root`.
    ///
    /// The result is deduplicated and sorted by full path. A missing
    /// directory yields an empty list; the caller decides whether that is fatal.
    pub fn discover(&self, root: &Path) -> Vec<DiscoveredFile> {
        if !root.is_dir() {
            tracing::debug!("Input directory does not exist: {:?}", root);
            return vec![];
        }

        let mut paths = Vec::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        // Sort by path for deterministic ordering
        paths.sort();
        paths.dedup();
        paths.into_iter().map(DiscoveredFile::new).collect()
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        if self.config.case_sensitive {
            self.config.supported_formats.iter().any(|fmt| fmt == ext)
        } else {
            self.config
                .supported_formats
                .iter()
                .any(|fmt| fmt.eq_ignore_ascii_case(ext))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.bmp")));
        assert!(discovery.is_supported(Path::new("test.tif")));
        assert!(discovery.is_supported(Path::new("test.tiff")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("png")));
    }

    #[test]
    fn test_extension_match_is_case_sensitive_by_default() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());
        assert!(!discovery.is_supported(Path::new("test.PNG")));
        assert!(!discovery.is_supported(Path::new("test.Jpg")));

        let relaxed = FileDiscovery::new(ProcessingConfig {
            case_sensitive: false,
            ..Default::default()
        });
        assert!(relaxed.is_supported(Path::new("test.PNG")));
    }

    #[test]
    fn test_discover_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a/z.jpg"));
        touch(&dir.path().join("a/notes.txt"));
        touch(&dir.path().join("c/deep/x.tiff"));

        let files = FileDiscovery::new(ProcessingConfig::default()).discover(dir.path());
        let rel: Vec<PathBuf> = files
            .iter()
            .map(|f| f.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/z.jpg"),
                PathBuf::from("b.png"),
                PathBuf::from("c/deep/x.tiff"),
            ]
        );
    }

    #[test]
    fn test_discover_keeps_duplicate_stems() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a/x.png"));
        touch(&dir.path().join("b/x.png"));

        let files = FileDiscovery::new(ProcessingConfig::default()).discover(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.stem == "x"));
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files =
            FileDiscovery::new(ProcessingConfig::default()).discover(&dir.path().join("nope"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_stem_drops_only_last_extension() {
        let file = DiscoveredFile::new(PathBuf::from("/imgs/post_10100.final.png"));
        assert_eq!(file.stem, "post_10100.final");
        assert_eq!(file.file_name(), "post_10100.final.png");
    }
}
