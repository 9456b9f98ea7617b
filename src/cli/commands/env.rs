//! Env command implementation.
//!
//! `eval "$(inscribe env /path/to/templates)"` in a shell profile pins the
//! template directory for later invocations.

use std::path::PathBuf;

use crate::config::TEMPLATE_DIR_ENV;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    dir: PathBuf,
}

impl EnvCommand {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The export line for the directory, made absolute.
    pub fn export_line(&self) -> Result<String> {
        let absolute = std::path::absolute(&self.dir)?;
        Ok(format!(
            "export {}={:?}\n",
            TEMPLATE_DIR_ENV,
            absolute.display().to_string()
        ))
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_document(&self.export_line()?);
        Ok(CommandResult::success())
    }
}
