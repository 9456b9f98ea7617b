//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::highlight::highlight_yaml;
use super::{
    prompt_user, should_use_colors, InscribeTheme, NonInteractiveUI, ProgressSpinner, Prompt,
    SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
///
/// Status lines go to stderr so stdout carries only generated documents.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: InscribeTheme,
    highlight: bool,
}

impl TerminalUI {
    pub fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: InscribeTheme::detect(),
            highlight: should_use_colors(),
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.err, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message))
    }

    fn show_document(&mut self, content: &str) {
        if self.highlight && self.out.is_term() {
            write!(self.out, "{}", highlight_yaml(content)).ok();
        } else {
            write!(self.out, "{}", content).ok();
        }
        if !content.ends_with('\n') {
            writeln!(self.out).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.err.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stderr().is_term() {
        Box::new(TerminalUI::new())
    } else {
        Box::new(NonInteractiveUI::new())
    }
}
