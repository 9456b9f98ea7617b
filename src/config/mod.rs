//! Configuration for Inscribe.
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults
//! 2. The config file (`--config`, else `.inscribe.yml` in the working directory)
//! 3. The environment (`INSCRIBE_TEMPLATE_DIR`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```
//! use inscribe::config::{load_config, Overrides, Settings};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".inscribe.yml"), "template_dir: ./tpl\n").unwrap();
//!
//! let file = load_config(None, temp.path()).unwrap();
//! let settings = Settings::resolve(file, Overrides::default());
//! assert_eq!(settings.template_dir, std::path::PathBuf::from("./tpl"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{discover_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{FileConfig, Overrides, Settings, DEFAULT_OUTPUT_DIR, DEFAULT_TEMPLATE_DIR};

/// Environment variable naming the template directory.
pub const TEMPLATE_DIR_ENV: &str = "INSCRIBE_TEMPLATE_DIR";
