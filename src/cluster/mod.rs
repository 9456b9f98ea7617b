//! Cluster introspection used to resolve auto-detected fields.
//!
//! The engine never talks to a cluster. Callers resolving
//! [`FieldKind::AutoDetect`](crate::fields::FieldKind) values go through
//! [`ClusterClient`], implemented by [`KubectlClient`] for real clusters and
//! [`MockClusterClient`] for tests.

pub mod kubectl;
pub mod mock;

pub use kubectl::KubectlClient;
pub use mock::MockClusterClient;

use crate::error::Result;

/// Read-only view of the clusters reachable from a kubeconfig.
pub trait ClusterClient {
    /// Context names in the kubeconfig.
    fn list_contexts(&self) -> Result<Vec<String>>;

    /// Namespace names in a context.
    fn list_namespaces(&self, context: &str) -> Result<Vec<String>>;

    /// Names of resources of `kind` in a namespace.
    ///
    /// An empty `namespace` searches every namespace.
    fn list_resources_of_kind(
        &self,
        context: &str,
        namespace: &str,
        kind: &str,
    ) -> Result<Vec<String>>;
}
