//! Interactive prompts.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::error::{InscribeError, Result};

use super::{Prompt, PromptOption, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> InscribeError {
    InscribeError::Io(e.into())
}

/// Prompt the user on `term`.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    match &prompt.prompt_type {
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = ColorfulTheme::default();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let input = match &prompt.default {
        Some(default) => input.default(default.clone()),
        None => input,
    };

    input.interact_on(term).map_err(map_dialoguer_err)
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<String> {
    if options.is_empty() {
        return Err(InscribeError::MissingValues {
            names: vec![prompt.key.clone()],
        });
    }

    let labels: Vec<_> = options.iter().map(|o| first_line(&o.label)).collect();

    let default_idx = default_index(prompt.default.as_deref(), options);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(options[selection].value.clone())
}

/// Index of the option matching `default` by value, else 0.
fn default_index(default: Option<&str>, options: &[PromptOption]) -> usize {
    default
        .and_then(|d| options.iter().position(|o| o.value == d))
        .unwrap_or(0)
}

fn first_line(label: &str) -> &str {
    label.lines().next().unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<PromptOption> {
        vec![
            PromptOption::plain("default"),
            PromptOption::plain("kube-system"),
            PromptOption::plain("production"),
        ]
    }

    #[test]
    fn default_index_matches_value() {
        assert_eq!(default_index(Some("production"), &options()), 2);
    }

    #[test]
    fn default_index_falls_back_to_first() {
        assert_eq!(default_index(Some("missing"), &options()), 0);
        assert_eq!(default_index(None, &options()), 0);
    }

    #[test]
    fn labels_show_first_line_only() {
        assert_eq!(first_line("Small\nrequests: 1"), "Small");
        assert_eq!(first_line(""), "");
    }
}
