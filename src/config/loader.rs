//! Configuration file discovery and loading.

use crate::config::schema::FileConfig;
use crate::error::{InscribeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".inscribe.yml";

/// Load a config file.
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InscribeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InscribeError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`FileConfig`].
///
/// An empty file is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<FileConfig> {
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| InscribeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Path of the config file in effect, if any.
///
/// An explicit path is always returned, existing or not, so a typo
/// surfaces as an error. Otherwise `.inscribe.yml` in `cwd` is used when
/// present.
pub fn discover_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Discover and load the config, or an empty one when there is none.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<FileConfig> {
    match discover_config(explicit, cwd) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(FileConfig::default()),
    }
}
