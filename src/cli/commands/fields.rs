//! Fields command implementation.
//!
//! The `inscribe fields <TEMPLATE>` command shows what a template asks for.

use crate::cli::args::FieldsArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::fields::{unique_fields, FieldKind};
use crate::registry::Registry;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The fields command implementation.
pub struct FieldsCommand<'a> {
    registry: &'a Registry,
    args: FieldsArgs,
}

impl<'a> FieldsCommand<'a> {
    pub fn new(registry: &'a Registry, args: FieldsArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for FieldsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let fields = unique_fields(&Engine::new(self.registry).extract_fields(&self.args.template)?);

        if self.args.json {
            let json = serde_json::to_string_pretty(&fields).map_err(anyhow::Error::from)?;
            ui.show_document(&json);
            return Ok(CommandResult::success());
        }

        if fields.is_empty() {
            ui.message(&format!("Template {} has no fields", self.args.template));
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["NAME", "KIND", "DETAIL"]);
        for field in &fields {
            let detail = match &field.kind {
                FieldKind::Manual { validation } => validation.as_str(),
                FieldKind::AutoDetect { source } => source.as_str(),
                FieldKind::TemplateGroup { group } => group.as_str(),
                FieldKind::List { list } => list.as_str(),
            };
            table.add_row(&[field.name.as_str(), field.kind.label(), detail]);
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
            temp.path().join("cnpg.yaml"),
            "{# inscribe: type=\"template\" name=\"cnpg\" command=\"cluster cnpg\" description=\"CNPG\" #}\n\
             name: {{ manual(name=\"name\", kind=\"dns-name\") }}\n\
             ns: {{ auto_detect(source=\"namespace\") }}\n\
             svc: {{ manual(name=\"name\", kind=\"dns-name\") }}-rw\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("plain.yaml"),
            "{# inscribe: type=\"template\" name=\"plain\" command=\"plain doc\" description=\"Plain\" #}\nkind: ConfigMap\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn shows_unique_fields() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();
        let args = FieldsArgs {
            template: "cnpg".into(),
            json: false,
        };

        FieldsCommand::new(&registry, args).execute(&mut ui).unwrap();

        assert_eq!(
            ui.documents()[0],
            "NAME       KIND         DETAIL\n\
             name       manual       dns-name\n\
             namespace  auto-detect  namespace"
        );
    }

    #[test]
    fn json_output_is_parseable() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();
        let args = FieldsArgs {
            template: "cnpg".into(),
            json: true,
        };

        FieldsCommand::new(&registry, args).execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.documents()[0]).unwrap();
        let fields = value.as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], "name");
        assert_eq!(fields[1]["order"], 1);
    }

    #[test]
    fn template_without_fields() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();
        let args = FieldsArgs {
            template: "plain".into(),
            json: false,
        };

        FieldsCommand::new(&registry, args).execute(&mut ui).unwrap();
        assert!(ui.has_message("has no fields"));
    }

    #[test]
    fn unknown_template_fails() {
        let temp = setup();
        let registry = Registry::new(temp.path()).unwrap();
        let mut ui = MockUI::new();
        let args = FieldsArgs {
            template: "nope".into(),
            json: false,
        };

        let err = FieldsCommand::new(&registry, args).execute(&mut ui).unwrap_err();
        assert!(err.is_not_found());
    }
}
