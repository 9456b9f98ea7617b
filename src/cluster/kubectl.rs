//! `kubectl`-backed cluster client.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{InscribeError, Result};

use super::ClusterClient;

/// Short kind names mapped to the resource kubectl expects.
const KIND_ALIASES: &[(&str, &str)] = &[
    ("cnpg-clusters", "clusters.postgresql.cnpg.io"),
    ("cnpg-cluster", "clusters.postgresql.cnpg.io"),
];

/// Cluster client that shells out to `kubectl`.
#[derive(Debug, Clone)]
pub struct KubectlClient {
    program: String,
    kubeconfig: Option<PathBuf>,
}

impl KubectlClient {
    /// Use `kubectl` from `PATH` with the default kubeconfig rules.
    pub fn new(kubeconfig: Option<PathBuf>) -> Self {
        Self {
            program: "kubectl".to_string(),
            kubeconfig,
        }
    }

    /// Use a different binary (e.g. a wrapper script).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Full argument list for a query, including global flags.
    fn args(&self, context: Option<&str>, rest: &[&str]) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(kubeconfig) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        if let Some(context) = context.filter(|c| !c.is_empty()) {
            args.push("--context".to_string());
            args.push(context.to_string());
        }
        args.extend(rest.iter().map(|s| s.to_string()));
        args
    }

    fn run(&self, args: Vec<String>) -> Result<Vec<String>> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        tracing::debug!("Running: {}", command_line);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| InscribeError::ClusterError {
                command: command_line.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(InscribeError::ClusterError {
                command: command_line,
                message: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(parse_names(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl ClusterClient for KubectlClient {
    fn list_contexts(&self) -> Result<Vec<String>> {
        self.run(self.args(None, &["config", "get-contexts", "-o", "name"]))
    }

    fn list_namespaces(&self, context: &str) -> Result<Vec<String>> {
        self.run(self.args(Some(context), &["get", "namespaces", "-o", "name"]))
    }

    fn list_resources_of_kind(
        &self,
        context: &str,
        namespace: &str,
        kind: &str,
    ) -> Result<Vec<String>> {
        let resource = resource_for_kind(kind);
        let mut rest = vec!["get", resource, "-o", "name"];
        if namespace.is_empty() {
            rest.push("--all-namespaces");
        } else {
            rest.push("-n");
            rest.push(namespace);
        }
        self.run(self.args(Some(context), &rest))
    }
}

/// kubectl resource name for a field source.
pub fn resource_for_kind(kind: &str) -> &str {
    KIND_ALIASES
        .iter()
        .find(|(alias, _)| *alias == kind)
        .map(|(_, resource)| *resource)
        .unwrap_or(kind)
}

/// One name per non-empty line, without the `kind/` prefix of `-o name`.
fn parse_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.rsplit_once('/') {
            Some((_, name)) => name.to_string(),
            None => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_strips_kind_prefix() {
        let out = "namespace/default\nnamespace/kube-system\n\n";
        assert_eq!(parse_names(out), vec!["default", "kube-system"]);
    }

    #[test]
    fn parse_names_keeps_plain_lines() {
        assert_eq!(parse_names("minikube\n  production  \n"), vec!["minikube", "production"]);
    }

    #[test]
    fn kind_aliases_resolve() {
        assert_eq!(resource_for_kind("cnpg-clusters"), "clusters.postgresql.cnpg.io");
        assert_eq!(resource_for_kind("secrets"), "secrets");
    }

    #[test]
    fn args_include_kubeconfig_and_context() {
        let client = KubectlClient::new(Some(PathBuf::from("/tmp/kc")));
        assert_eq!(
            client.args(Some("prod"), &["get", "namespaces"]),
            vec!["--kubeconfig", "/tmp/kc", "--context", "prod", "get", "namespaces"]
        );
    }

    #[test]
    fn args_skip_empty_context() {
        let client = KubectlClient::new(None);
        assert_eq!(
            client.args(Some(""), &["config", "get-contexts"]),
            vec!["config", "get-contexts"]
        );
    }

    #[test]
    fn missing_binary_is_cluster_error() {
        let client = KubectlClient::new(None).with_program("inscribe-no-such-kubectl");
        let err = client.list_contexts().unwrap_err();
        match err {
            InscribeError::ClusterError { command, .. } => {
                assert!(command.starts_with("inscribe-no-such-kubectl "));
                assert!(command.contains("get-contexts"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_status() {
        let client = KubectlClient::new(None).with_program("false");
        let err = client.list_namespaces("minikube").unwrap_err();
        assert!(matches!(err, InscribeError::ClusterError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn successful_command_output_is_parsed() {
        // `echo` prints its arguments back as a single line.
        let client = KubectlClient::new(None).with_program("echo");
        let names = client.list_contexts().unwrap();
        assert_eq!(names, vec!["config get-contexts -o name"]);
    }
}
