//! Interactive collection of missing field values.

use std::collections::HashMap;

use crate::cluster::ClusterClient;
use crate::error::{InscribeError, Result};
use crate::fields::{unique_fields, FieldDefinition, FieldKind};
use crate::registry::Registry;
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::{resolve_value, validate_filename, Resolution, CONTEXT_KEY, NAMESPACE_KEY};

/// Attempts allowed for a typed value before giving up.
pub const MAX_ATTEMPTS: usize = 3;

/// Prompt sequence for the fields a command line left open.
///
/// Order: Kubernetes context, namespace, other auto-detected resources,
/// then the remaining fields in template order, then the filename.
pub struct Wizard<'a> {
    registry: &'a Registry,
    cluster: &'a dyn ClusterClient,
}

impl<'a> Wizard<'a> {
    pub fn new(registry: &'a Registry, cluster: &'a dyn ClusterClient) -> Self {
        Self { registry, cluster }
    }

    /// Fill every empty field in `values` and settle on a filename.
    pub fn run(
        &self,
        ui: &mut dyn UserInterface,
        fields: &[FieldDefinition],
        mut values: HashMap<String, String>,
        filename: Option<&str>,
        default_filename: &str,
    ) -> Result<Resolution> {
        let fields = unique_fields(fields);
        let is_missing = |values: &HashMap<String, String>, name: &str| {
            values.get(name).map_or(true, |v| v.is_empty())
        };

        let needs_cluster = fields
            .iter()
            .any(|f| f.is_auto_detect() && is_missing(&values, &f.name));

        if needs_cluster && is_missing(&values, CONTEXT_KEY) {
            let context = self.select_context(ui)?;
            values.insert(CONTEXT_KEY.to_string(), context);
        }
        let context = values.get(CONTEXT_KEY).cloned().unwrap_or_default();

        let wants_namespace = fields
            .iter()
            .any(|f| f.is_auto_detect() && f.name == NAMESPACE_KEY);
        if wants_namespace && is_missing(&values, NAMESPACE_KEY) {
            let namespace = self.select_namespace(ui, &context)?;
            values.insert(NAMESPACE_KEY.to_string(), namespace);
        }

        for field in fields.iter().filter(|f| f.is_auto_detect()) {
            if !is_missing(&values, &field.name) {
                continue;
            }
            let namespace = values.get(NAMESPACE_KEY).cloned().unwrap_or_default();
            let kind = field.kind.source().unwrap_or(&field.name);
            let value = self.select_resource(ui, &context, &namespace, kind)?;
            values.insert(field.name.clone(), value);
        }

        for field in fields.iter().filter(|f| !f.is_auto_detect()) {
            if !is_missing(&values, &field.name) {
                continue;
            }
            let value = match &field.kind {
                FieldKind::Manual { validation } => self.ask_manual(ui, field, validation)?,
                FieldKind::TemplateGroup { group } => self.select_fragment(ui, field, group)?,
                FieldKind::List { list } => self.select_item(ui, field, list)?,
                FieldKind::AutoDetect { .. } => continue,
            };
            values.insert(field.name.clone(), value);
        }

        let filename = match filename {
            Some(name) => validate_filename(name)?,
            None => ask_until_valid(
                ui,
                &Prompt::input("filename", "Output filename").with_default(default_filename),
                validate_filename,
            )?,
        };

        Ok(Resolution { values, filename })
    }

    fn select_context(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let contexts = query(ui, "Loading Kubernetes contexts...", || {
            self.cluster.list_contexts()
        })?;
        choose(ui, CONTEXT_KEY, "Kubernetes context", contexts)
    }

    fn select_namespace(&self, ui: &mut dyn UserInterface, context: &str) -> Result<String> {
        let namespaces = query(ui, &format!("Loading namespaces in {}...", context), || {
            self.cluster.list_namespaces(context)
        })?;
        choose(ui, NAMESPACE_KEY, "Namespace", namespaces)
    }

    fn select_resource(
        &self,
        ui: &mut dyn UserInterface,
        context: &str,
        namespace: &str,
        kind: &str,
    ) -> Result<String> {
        let names = query(ui, &format!("Loading {}...", kind), || {
            self.cluster.list_resources_of_kind(context, namespace, kind)
        })?;
        choose(ui, kind, kind, names)
    }

    fn ask_manual(
        &self,
        ui: &mut dyn UserInterface,
        field: &FieldDefinition,
        validation: &str,
    ) -> Result<String> {
        let prompt = Prompt::input(&field.name, format!("{} ({})", field.name, validation));
        ask_until_valid(ui, &prompt, |answer| {
            resolve_value(self.registry, field, answer)
        })
    }

    fn select_fragment(
        &self,
        ui: &mut dyn UserInterface,
        field: &FieldDefinition,
        group: &str,
    ) -> Result<String> {
        let options = self
            .registry
            .get_sub_templates(group)?
            .iter()
            .map(|sub| {
                let label = if sub.description.is_empty() {
                    sub.path.display().to_string()
                } else {
                    sub.description.clone()
                };
                PromptOption::new(label, sub.content.clone())
            })
            .collect();
        ui.prompt(&Prompt::select(&field.name, &field.name, options))
    }

    fn select_item(
        &self,
        ui: &mut dyn UserInterface,
        field: &FieldDefinition,
        list: &str,
    ) -> Result<String> {
        let options = self
            .registry
            .get_static_list(list)?
            .items
            .iter()
            .map(PromptOption::plain)
            .collect();
        ui.prompt(&Prompt::select(&field.name, &field.name, options))
    }
}

/// Run a cluster query behind a spinner.
fn query(
    ui: &mut dyn UserInterface,
    message: &str,
    run: impl FnOnce() -> Result<Vec<String>>,
) -> Result<Vec<String>> {
    let mut spinner = ui.start_spinner(message);
    match run() {
        Ok(names) => {
            spinner.finish_success(&format!("Found {}", names.len()));
            Ok(names)
        }
        Err(err) => {
            spinner.finish_error(&err.to_string());
            Err(err)
        }
    }
}

/// Select from `items`, or free text when there is nothing to pick.
fn choose(ui: &mut dyn UserInterface, key: &str, question: &str, items: Vec<String>) -> Result<String> {
    if items.is_empty() {
        ui.warning(&format!("No {} found, enter a value", question));
        return ui.prompt(&Prompt::input(key, question));
    }
    let options = items.into_iter().map(PromptOption::plain).collect();
    ui.prompt(&Prompt::select(key, question, options))
}

/// Re-ask while the answer fails validation, up to [`MAX_ATTEMPTS`].
fn ask_until_valid(
    ui: &mut dyn UserInterface,
    prompt: &Prompt,
    check: impl Fn(&str) -> Result<String>,
) -> Result<String> {
    let mut attempt = 1;
    loop {
        let answer = ui.prompt(prompt)?;
        match check(&answer) {
            Ok(value) => return Ok(value),
            Err(err @ InscribeError::ValidationError { .. }) if attempt < MAX_ATTEMPTS => {
                ui.warning(&err.to_string());
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
