//! List command implementation.
//!
//! The `inscribe list` command lists the templates of the registry.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::Registry;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    registry: &'a Registry,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    pub fn new(registry: &'a Registry, args: ListArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let templates = match &self.args.prefix {
            Some(prefix) => self.registry.list_templates_by_command_prefix(prefix),
            None => self.registry.list_templates(),
        };

        if templates.is_empty() {
            ui.warning(&format!(
                "No templates found in {}",
                self.registry.root().display()
            ));
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["NAME", "COMMAND", "DESCRIPTION"]);
        for template in templates {
            table.add_row(&[&template.name, &template.command, &template.description]);
        }
        ui.show_document(&table.render());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("b.yaml"),
            "{# inscribe: type=\"template\" name=\"redis\" command=\"cache redis\" description=\"Redis\" #}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("a.yaml"),
            "{# inscribe: type=\"template\" name=\"cnpg-cluster\" command=\"cluster cnpg\" description=\"CNPG cluster\" #}\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn lists_templates_by_name() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();

        ListCommand::new(&registry, ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(
            ui.documents()[0],
            "NAME          COMMAND       DESCRIPTION\n\
             cnpg-cluster  cluster cnpg  CNPG cluster\n\
             redis         cache redis   Redis"
        );
    }

    #[test]
    fn prefix_filters_by_command() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();
        let args = ListArgs {
            prefix: Some("clu".into()),
        };

        ListCommand::new(&registry, args).execute(&mut ui).unwrap();

        let output = ui.documents()[0];
        assert!(output.contains("cnpg-cluster"));
        assert!(!output.contains("redis"));
    }

    #[test]
    fn empty_registry_warns() {
        let temp = TempDir::new().unwrap();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();

        let result = ListCommand::new(&registry, ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No templates found"));
        assert!(ui.documents().is_empty());
    }
}
