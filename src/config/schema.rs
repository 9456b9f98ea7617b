//! Configuration file and resolved settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default template directory, relative to the working directory.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Contents of `.inscribe.yml`.
///
/// Every key is optional; unset keys fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// kubeconfig passed to kubectl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubernetes context used without asking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub template_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            kubeconfig: None,
            context: None,
        }
    }
}

impl Settings {
    /// Layer defaults, then the file, then overrides.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let defaults = Self::default();
        Self {
            template_dir: overrides
                .template_dir
                .or(file.template_dir)
                .unwrap_or(defaults.template_dir),
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or(defaults.output_dir),
            kubeconfig: overrides.kubeconfig.or(file.kubeconfig),
            context: overrides.context.or(file.context),
        }
    }
}
