//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{InscribeError, Result};

use super::{Prompt, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "INSCRIBE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `INSCRIBE_PROMPT_<KEY>` variables, then from
/// the prompt default. Anything else is an error.
pub struct NonInteractiveUI {
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading overrides from the environment.
    pub fn new() -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self { env_overrides }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            env_overrides: overrides,
        }
    }

    /// Environment variable consulted for a prompt key.
    pub fn env_key(key: &str) -> String {
        format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            key.to_uppercase().replace('-', "_")
        )
    }
}

impl Default for NonInteractiveUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let answer = self
            .env_overrides
            .get(&Self::env_key(&prompt.key))
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| InscribeError::MissingValues {
                names: vec![prompt.key.clone()],
            })?;

        match &prompt.prompt_type {
            PromptType::Select { options } => Ok(options
                .iter()
                .find(|o| o.label == answer)
                .map(|o| o.value.clone())
                .unwrap_or(answer)),
            PromptType::Input => Ok(answer),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        tracing::debug!("{}", message);
        Box::new(NoopSpinner)
    }

    fn show_document(&mut self, content: &str) {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only logs its outcome.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        tracing::debug!("{}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        tracing::debug!("{}", msg);
    }
}
