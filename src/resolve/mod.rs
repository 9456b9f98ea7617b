//! Turning extracted fields plus user input into a render-ready value map.
//!
//! Provided values (flags, `--set`) are checked and normalised first:
//! manual values pass their validator, group selections are replaced by
//! the fragment content, list selections must be members. Whatever is
//! still missing is collected by the [`Wizard`] when a terminal is
//! available, and is an error otherwise.

pub mod wizard;

pub use wizard::Wizard;

use crate::cluster::ClusterClient;
use crate::error::{InscribeError, Result};
use crate::fields::{parse_value, unique_fields, FieldDefinition, FieldKind, Filename};
use crate::registry::{Registry, SubTemplateMeta};
use crate::ui::UserInterface;
use std::collections::HashMap;
use std::path::Path;

/// Key under which the selected Kubernetes context is exposed.
pub const CONTEXT_KEY: &str = "context";

/// Key under which the selected namespace is exposed.
pub const NAMESPACE_KEY: &str = "namespace";

/// What the caller already knows before resolution starts.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Template name, used for the default filename.
    pub template: String,
    /// Values keyed by field name.
    pub provided: HashMap<String, String>,
    pub filename: Option<String>,
    pub context: Option<String>,
}

/// Final values and output filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub values: HashMap<String, String>,
    pub filename: String,
}

/// `<template>.yaml`
pub fn default_filename(template: &str) -> String {
    format!("{}.yaml", template)
}

/// Check one raw value for a field and return what should be rendered.
pub fn resolve_value(registry: &Registry, field: &FieldDefinition, raw: &str) -> Result<String> {
    match &field.kind {
        FieldKind::Manual { validation } => parse_value(validation, raw)
            .map(|v| v.to_string())
            .map_err(|e| e.for_field(&field.name, raw)),
        FieldKind::AutoDetect { .. } => Ok(raw.to_string()),
        FieldKind::TemplateGroup { group } => {
            let subs = registry.get_sub_templates(group)?;
            subs.iter()
                .find(|sub| matches_sub_template(raw, sub))
                .map(|sub| sub.content.clone())
                .ok_or_else(|| InscribeError::ResolutionError {
                    field: field.name.clone(),
                    value: raw.to_string(),
                    options: subs.iter().map(|s| s.description.clone()).collect(),
                })
        }
        FieldKind::List { list } => {
            let list = registry.get_static_list(list)?;
            if list.contains(raw) {
                Ok(raw.to_string())
            } else {
                Err(InscribeError::ResolutionError {
                    field: field.name.clone(),
                    value: raw.to_string(),
                    options: list.items.clone(),
                })
            }
        }
    }
}

/// A selection names a fragment by its description or its file path.
fn matches_sub_template(raw: &str, sub: &SubTemplateMeta) -> bool {
    raw == sub.description || Path::new(raw) == sub.path
}

/// Resolve every provided, non-empty value that belongs to a field.
///
/// Provided keys that match no field are passed through untouched.
pub fn resolve_provided(
    registry: &Registry,
    fields: &[FieldDefinition],
    provided: &HashMap<String, String>,
) -> Result<HashMap<String, String>> {
    let mut values = provided.clone();
    for field in unique_fields(fields) {
        let Some(raw) = provided.get(&field.name).filter(|v| !v.is_empty()) else {
            continue;
        };
        let resolved = resolve_value(registry, &field, raw)?;
        values.insert(field.name.clone(), resolved);
    }
    Ok(values)
}

/// Names of fields with no value or an empty one, in first-occurrence order.
pub fn missing_fields(fields: &[FieldDefinition], values: &HashMap<String, String>) -> Vec<String> {
    unique_fields(fields)
        .into_iter()
        .filter(|f| values.get(&f.name).map_or(true, |v| v.is_empty()))
        .map(|f| f.name)
        .collect()
}

fn validate_filename(filename: &str) -> Result<String> {
    Filename::new(filename)
        .map(Filename::into_inner)
        .map_err(|e| e.for_field("filename", filename))
}

/// Resolve all fields of a template.
///
/// Falls back to the wizard when something is missing and `ui` is
/// interactive; otherwise missing fields are reported together.
pub fn resolve(
    registry: &Registry,
    fields: &[FieldDefinition],
    request: &Request,
    ui: &mut dyn UserInterface,
    cluster: &dyn ClusterClient,
) -> Result<Resolution> {
    let mut provided = request.provided.clone();
    if let Some(context) = request.context.as_ref().filter(|c| !c.is_empty()) {
        provided
            .entry(CONTEXT_KEY.to_string())
            .or_insert_with(|| context.clone());
    }

    let values = resolve_provided(registry, fields, &provided)?;
    let missing = missing_fields(fields, &values);
    let default_name = default_filename(&request.template);

    if ui.is_interactive() && (!missing.is_empty() || request.filename.is_none()) {
        tracing::debug!("Starting wizard for {} missing fields", missing.len());
        return Wizard::new(registry, cluster).run(
            ui,
            fields,
            values,
            request.filename.as_deref(),
            &default_name,
        );
    }

    if !missing.is_empty() {
        return Err(InscribeError::MissingValues { names: missing });
    }

    let filename = validate_filename(request.filename.as_deref().unwrap_or(&default_name))?;
    Ok(Resolution { values, filename })
}
