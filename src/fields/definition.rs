//! Field definitions discovered by the extraction pass.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// How a field's value is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Typed by the user, checked against a named validator.
    Manual { validation: String },
    /// Looked up from the cluster.
    AutoDetect { source: String },
    /// One fragment picked from a sub-template group.
    TemplateGroup { group: String },
    /// One item picked from a static list.
    List { list: String },
}

impl FieldKind {
    /// Short label used in listings and help text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual { .. } => "manual",
            Self::AutoDetect { .. } => "auto-detect",
            Self::TemplateGroup { .. } => "template-group",
            Self::List { .. } => "list",
        }
    }

    /// Validator name for manual fields.
    pub fn validation(&self) -> Option<&str> {
        match self {
            Self::Manual { validation } => Some(validation),
            _ => None,
        }
    }

    /// Group, list or cluster resource the value is drawn from.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Manual { .. } => None,
            Self::AutoDetect { source } => Some(source),
            Self::TemplateGroup { group } => Some(group),
            Self::List { list } => Some(list),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual { validation } => write!(f, "manual ({})", validation),
            Self::AutoDetect { source } => write!(f, "auto-detect ({})", source),
            Self::TemplateGroup { group } => write!(f, "template-group ({})", group),
            Self::List { list } => write!(f, "list ({})", list),
        }
    }
}

/// One field directive occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Resolution key.
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Zero-based position in evaluation order. Display only.
    pub order: usize,
}

impl FieldDefinition {
    pub fn manual(name: impl Into<String>, validation: impl Into<String>, order: usize) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Manual {
                validation: validation.into(),
            },
            order,
        }
    }

    pub fn auto_detect(source: impl Into<String>, order: usize) -> Self {
        let source = source.into();
        Self {
            name: source.clone(),
            kind: FieldKind::AutoDetect { source },
            order,
        }
    }

    pub fn template_group(group: impl Into<String>, order: usize) -> Self {
        let group = group.into();
        Self {
            name: group.clone(),
            kind: FieldKind::TemplateGroup { group },
            order,
        }
    }

    pub fn list(list: impl Into<String>, order: usize) -> Self {
        let list = list.into();
        Self {
            name: list.clone(),
            kind: FieldKind::List { list },
            order,
        }
    }

    pub fn is_auto_detect(&self) -> bool {
        matches!(self.kind, FieldKind::AutoDetect { .. })
    }
}

/// Collapse repeated names, keeping each name's first occurrence.
///
/// Extraction records every directive call; flags and prompts need one
/// entry per resolution key.
pub fn unique_fields(fields: &[FieldDefinition]) -> Vec<FieldDefinition> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .filter(|f| seen.insert(f.name.as_str()))
        .cloned()
        .collect()
}
