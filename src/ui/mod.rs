//! Terminal output and prompting.
//!
//! Commands and the wizard talk to a [`UserInterface`]. [`TerminalUI`]
//! draws with dialoguer and indicatif, [`NonInteractiveUI`] answers prompts
//! from defaults or `INSCRIBE_PROMPT_<KEY>` variables, and [`MockUI`] records
//! everything for tests.
//!
//! # Example
//!
//! ```
//! use inscribe::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("name", "orders");
//!
//! let answer = ui.prompt(&Prompt::input("name", "Cluster name")).unwrap();
//! assert_eq!(answer, "orders");
//! ```

pub mod highlight;
pub mod mock;
pub mod non_interactive;
pub mod prompts;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use highlight::highlight_yaml;
pub use mock::{Channel, MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, InscribeTheme};

use crate::error::Result;

/// Where commands send status lines, prompts and documents.
///
/// Status lines go to stderr so that documents on stdout can be piped.
pub trait UserInterface {
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    /// Show a prompt and return the chosen or typed value.
    fn prompt(&mut self, prompt: &Prompt) -> Result<String>;

    /// Spinner shown while a cluster query runs.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Print a generated document verbatim.
    fn show_document(&mut self, content: &str);

    /// Whether prompts can reach a person.
    fn is_interactive(&self) -> bool;
}

/// A running spinner, finished exactly once with the query outcome.
pub trait SpinnerHandle {
    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}

/// A prompt to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Unique key for the prompt, used for env and mock lookup.
    pub key: String,
    /// The question to display.
    pub question: String,
    pub prompt_type: PromptType,
    /// Value used when the user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Free-form text prompt.
    pub fn input(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }

    /// Single-choice prompt.
    pub fn select(
        key: impl Into<String>,
        question: impl Into<String>,
        options: Vec<PromptOption>,
    ) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Select { options },
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Options of a select prompt, empty for input.
    pub fn options(&self) -> &[PromptOption] {
        match &self.prompt_type {
            PromptType::Select { options } => options,
            PromptType::Input => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptType {
    /// Free-form text input.
    Input,
    /// Select one from a list of options.
    Select { options: Vec<PromptOption> },
}

/// One choice of a select prompt; the label is shown, the value returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    pub label: String,
    pub value: String,
}

impl PromptOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}
