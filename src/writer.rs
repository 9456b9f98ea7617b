//! Writing rendered manifests to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InscribeError, Result};

/// Destination for rendered documents.
pub trait ManifestWriter {
    /// Write `content` to `directory/filename` and return the full path.
    fn write(&self, content: &str, directory: &Path, filename: &str) -> Result<PathBuf>;
}

/// Writes to the local filesystem, creating the directory if needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter;

impl ManifestWriter for FileWriter {
    fn write(&self, content: &str, directory: &Path, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(directory).map_err(|e| InscribeError::WriteFailure {
            path: directory.to_path_buf(),
            message: format!("creating directory: {}", e),
        })?;

        let path = directory.join(filename);
        fs::write(&path, content).map_err(|e| InscribeError::WriteFailure {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_file_and_returns_path() {
        let temp = TempDir::new().unwrap();
        let path = FileWriter
            .write("kind: Cluster\n", temp.path(), "db.yaml")
            .unwrap();

        assert_eq!(path, temp.path().join("db.yaml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "kind: Cluster\n");
    }

    #[test]
    fn creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out").join("nested");

        let path = FileWriter.write("a: 1\n", &dir, "x.yaml").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        FileWriter.write("old", temp.path(), "x.yaml").unwrap();
        let path = FileWriter.write("new", temp.path(), "x.yaml").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn directory_blocked_by_file_is_write_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = FileWriter.write("a", &blocker, "x.yaml").unwrap_err();
        assert!(matches!(err, InscribeError::WriteFailure { .. }));
    }
}
