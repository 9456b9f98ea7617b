//! Shell completions generation.
//!
//! The `inscribe completions` command generates shell completion scripts,
//! including the commands built from the current template directory.

use clap_complete::Shell;

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    shell: Shell,
    command: clap::Command,
}

impl CompletionsCommand {
    pub fn new(shell: Shell, command: clap::Command) -> Self {
        Self { shell, command }
    }

    /// The completion script as text.
    pub fn script(&self) -> String {
        let mut cmd = self.command.clone();
        let mut buf = Vec::new();
        clap_complete::generate(self.shell, &mut cmd, "inscribe", &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_document(&self.script());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use clap::CommandFactory;

    #[test]
    fn generates_bash_completions() {
        let output = CompletionsCommand::new(Shell::Bash, Cli::command()).script();
        assert!(output.contains("inscribe"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let output = CompletionsCommand::new(Shell::Zsh, Cli::command()).script();
        assert!(output.contains("inscribe"));
    }

    #[test]
    fn includes_template_commands() {
        let cmd = Cli::command().subcommand(
            clap::Command::new("cluster").subcommand(clap::Command::new("cnpg")),
        );
        let output = CompletionsCommand::new(Shell::Fish, cmd).script();
        assert!(output.contains("cluster"));
        assert!(output.contains("cnpg"));
    }
}
