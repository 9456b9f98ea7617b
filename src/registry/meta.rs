//! Catalog entry types.

use serde::Serialize;
use std::path::PathBuf;

/// A main template: one generatable manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateMeta {
    /// Unique key in the registry.
    pub name: String,
    /// Space-separated command path, e.g. `cluster cnpg`. May be empty.
    pub command: String,
    pub description: String,
    /// Source file. Content is re-read from here at use time.
    pub path: PathBuf,
}

impl TemplateMeta {
    /// Command path split into its words.
    pub fn command_words(&self) -> Vec<&str> {
        self.command.split_whitespace().collect()
    }
}

/// A fragment belonging to a named group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubTemplateMeta {
    pub group: String,
    /// Label shown to the user when choosing between fragments.
    pub description: String,
    /// File content after the header line.
    pub content: String,
    pub path: PathBuf,
}

/// A named list of selectable strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticListMeta {
    pub name: String,
    pub items: Vec<String>,
    pub path: PathBuf,
}

impl StaticListMeta {
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_words_splits_on_whitespace() {
        let meta = TemplateMeta {
            name: "cnpg-cluster".into(),
            command: "cluster  cnpg".into(),
            description: String::new(),
            path: PathBuf::from("t.yaml"),
        };
        assert_eq!(meta.command_words(), vec!["cluster", "cnpg"]);
    }

    #[test]
    fn static_list_membership_is_exact() {
        let list = StaticListMeta {
            name: "backup-methods".into(),
            items: vec!["barmanObjectStore".into(), "volumeSnapshot".into()],
            path: PathBuf::from("l.yaml"),
        };
        assert!(list.contains("volumeSnapshot"));
        assert!(!list.contains("volumesnapshot"));
    }
}
