//! A recording [`UserInterface`] for tests.
//!
//! Every line written is kept with the channel it went to, and prompts are
//! answered from scripted responses.
//!
//! ```
//! use inscribe::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Resolving fields");
//! ui.success("Manifest written");
//!
//! assert!(ui.has_message("Resolving"));
//! assert!(ui.has_success("written"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{Prompt, PromptType, SpinnerHandle, UserInterface};

/// Where a recorded line was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Message,
    Success,
    Warning,
    Error,
    Document,
    Spinner,
}

/// Records output and plays back prompt answers.
///
/// A prompt takes, in order: the next queued answer for its key, the fixed
/// answer for its key, the prompt default, then the first option (select)
/// or an empty string (input). A select answer may name an option by label
/// or by value; the option value is returned.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    output: Vec<(Channel, String)>,
    answers: HashMap<String, String>,
    queued: HashMap<String, VecDeque<String>>,
    prompts: Vec<Prompt>,
}

impl MockUI {
    pub fn new() -> Self {
        Self {
            interactive: true,
            ..Default::default()
        }
    }

    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.answers.insert(key.to_string(), response.to_string());
    }

    /// Answers consumed one per prompt before the fixed answer applies.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        self.queued.insert(
            key.to_string(),
            responses.into_iter().map(String::from).collect(),
        );
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Lines sent to one channel, oldest first.
    pub fn output(&self, channel: Channel) -> Vec<&str> {
        self.output
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn documents(&self) -> Vec<&str> {
        self.output(Channel::Document)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.output(Channel::Warning)
    }

    /// Messages of the spinners started.
    pub fn spinners(&self) -> Vec<&str> {
        self.output(Channel::Spinner)
    }

    pub fn prompts_shown(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn prompt_keys(&self) -> Vec<&str> {
        self.prompts.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.contains(Channel::Message, needle)
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.contains(Channel::Success, needle)
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.contains(Channel::Warning, needle)
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.contains(Channel::Error, needle)
    }

    fn contains(&self, channel: Channel, needle: &str) -> bool {
        self.output
            .iter()
            .any(|(c, line)| *c == channel && line.contains(needle))
    }

    fn record(&mut self, channel: Channel, line: &str) {
        self.output.push((channel, line.to_string()));
    }

    fn scripted_answer(&mut self, key: &str) -> Option<String> {
        self.queued
            .get_mut(key)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.answers.get(key).cloned())
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.record(Channel::Message, msg);
    }

    fn success(&mut self, msg: &str) {
        self.record(Channel::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.record(Channel::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.record(Channel::Error, msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts.push(prompt.clone());
        let answer = self
            .scripted_answer(&prompt.key)
            .or_else(|| prompt.default.clone());

        Ok(match (&prompt.prompt_type, answer) {
            (PromptType::Select { options }, Some(answer)) => options
                .iter()
                .find(|o| o.value == answer || o.label == answer)
                .map(|o| o.value.clone())
                .unwrap_or(answer),
            (PromptType::Select { options }, None) => {
                options.first().map(|o| o.value.clone()).unwrap_or_default()
            }
            (PromptType::Input, answer) => answer.unwrap_or_default(),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(Channel::Spinner, message);
        Box::new(MockSpinner::default())
    }

    fn show_document(&mut self, content: &str) {
        self.record(Channel::Document, content);
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that remembers how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    outcome: Option<(bool, String)>,
}

impl MockSpinner {
    /// `(succeeded, message)` once finished.
    pub fn outcome(&self) -> Option<(bool, &str)> {
        self.outcome.as_ref().map(|(ok, msg)| (*ok, msg.as_str()))
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.outcome = Some((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcome = Some((false, msg.to_string()));
    }
}
