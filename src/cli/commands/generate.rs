//! Generate command implementation.
//!
//! Extracts the fields of a template, resolves them from flags and the
//! wizard, renders the template and writes the result.

use std::path::{Path, PathBuf};

use crate::cluster::{ClusterClient, MockClusterClient};
use crate::engine::Engine;
use crate::error::{InscribeError, Result};
use crate::fields::unique_fields;
use crate::registry::{Registry, TemplateMeta};
use crate::resolve::{resolve, Request, CONTEXT_KEY};
use crate::ui::{Prompt, PromptOption, UserInterface};
use crate::writer::{FileWriter, ManifestWriter};

use super::dispatcher::{Command, CommandResult};

/// The generate command implementation.
pub struct GenerateCommand<'a> {
    registry: &'a Registry,
    request: Request,
    output_dir: PathBuf,
    cluster: Option<&'a dyn ClusterClient>,
    writer: Option<&'a dyn ManifestWriter>,
}

impl<'a> GenerateCommand<'a> {
    pub fn new(registry: &'a Registry, request: Request, output_dir: &Path) -> Self {
        Self {
            registry,
            request,
            output_dir: output_dir.to_path_buf(),
            cluster: None,
            writer: None,
        }
    }

    pub fn with_cluster(mut self, cluster: &'a dyn ClusterClient) -> Self {
        self.cluster = Some(cluster);
        self
    }

    pub fn with_writer(mut self, writer: &'a dyn ManifestWriter) -> Self {
        self.writer = Some(writer);
        self
    }
}

impl Command for GenerateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = Engine::new(self.registry);
        let template = &self.request.template;

        let fields = engine.extract_fields(template)?;
        tracing::debug!("Template {} declares {} fields", template, fields.len());

        let known = unique_fields(&fields);
        for key in self.request.provided.keys() {
            if key != CONTEXT_KEY && !known.iter().any(|f| &f.name == key) {
                ui.warning(&format!("Template {} has no field '{}', ignoring", template, key));
            }
        }

        let empty_cluster = MockClusterClient::empty();
        let cluster = self.cluster.unwrap_or(&empty_cluster);
        let resolution = resolve(self.registry, &fields, &self.request, ui, cluster)?;

        let rendered = engine.render(template, &resolution.values)?;

        let writer = self.writer.unwrap_or(&FileWriter);
        let path = writer.write(&rendered, &self.output_dir, &resolution.filename)?;

        ui.success(&format!("Manifest written to: {}", path.display()));
        ui.show_document(&rendered);
        Ok(CommandResult::success())
    }
}

/// Pick the template behind a parent command.
///
/// A single match is used directly; several are offered as a choice.
pub fn select_template<'r>(
    registry: &'r Registry,
    parent: &str,
    ui: &mut dyn UserInterface,
) -> Result<&'r TemplateMeta> {
    let matches: Vec<&TemplateMeta> = registry
        .list_templates_by_command_prefix(parent)
        .into_iter()
        .filter(|t| t.command_words().first() == Some(&parent))
        .collect();

    match matches.as_slice() {
        [] => Err(InscribeError::not_found("template command", parent)),
        [only] => Ok(*only),
        _ => {
            let options = matches
                .iter()
                .map(|t| PromptOption::new(&t.description, &t.name))
                .collect();
            let choice = ui.prompt(&Prompt::select("template", "Select a template", options))?;
            matches
                .into_iter()
                .find(|t| t.name == choice)
                .ok_or_else(|| InscribeError::not_found("template", &choice))
        }
    }
}
