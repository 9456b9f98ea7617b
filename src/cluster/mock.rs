//! In-memory cluster client for tests and demos.

use std::collections::BTreeMap;

use crate::error::{InscribeError, Result};

use super::ClusterClient;

type Resources = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>;

/// Cluster client backed by canned data.
///
/// `resources` is keyed by context, then namespace, then kind.
#[derive(Debug, Clone, Default)]
pub struct MockClusterClient {
    pub contexts: Vec<String>,
    pub namespaces: BTreeMap<String, Vec<String>>,
    pub resources: Resources,
}

impl MockClusterClient {
    /// An empty client.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Three contexts with a few namespaces and CNPG clusters.
    pub fn new() -> Self {
        let mut client = Self::empty();
        client.add_context("minikube", &["default", "kube-system", "cnpg-system"]);
        client.add_context(
            "production",
            &["default", "kube-system", "app-prod", "cnpg-system"],
        );
        client.add_context(
            "staging",
            &["default", "kube-system", "app-staging", "cnpg-system"],
        );
        client.add_resources(
            "production",
            "app-prod",
            "cnpg-clusters",
            &["main-db", "analytics-db"],
        );
        client.add_resources("staging", "app-staging", "cnpg-clusters", &["staging-db"]);
        client
    }

    pub fn add_context(&mut self, context: &str, namespaces: &[&str]) {
        self.contexts.push(context.to_string());
        self.namespaces.insert(
            context.to_string(),
            namespaces.iter().map(|n| n.to_string()).collect(),
        );
    }

    pub fn add_resources(&mut self, context: &str, namespace: &str, kind: &str, names: &[&str]) {
        self.resources
            .entry(context.to_string())
            .or_default()
            .entry(namespace.to_string())
            .or_default()
            .entry(kind.to_string())
            .or_default()
            .extend(names.iter().map(|n| n.to_string()));
    }
}

impl ClusterClient for MockClusterClient {
    fn list_contexts(&self) -> Result<Vec<String>> {
        Ok(self.contexts.clone())
    }

    fn list_namespaces(&self, context: &str) -> Result<Vec<String>> {
        self.namespaces
            .get(context)
            .cloned()
            .ok_or_else(|| InscribeError::ClusterError {
                command: format!("list namespaces --context {}", context),
                message: format!("context '{}' not found", context),
            })
    }

    fn list_resources_of_kind(
        &self,
        context: &str,
        namespace: &str,
        kind: &str,
    ) -> Result<Vec<String>> {
        let Some(by_namespace) = self.resources.get(context) else {
            return Ok(Vec::new());
        };

        let names = by_namespace
            .iter()
            .filter(|(ns, _)| namespace.is_empty() || ns.as_str() == namespace)
            .filter_map(|(_, kinds)| kinds.get(kind))
            .flatten()
            .cloned()
            .collect();
        Ok(names)
    }
}
