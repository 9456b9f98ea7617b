//! Commands built from the template registry.
//!
//! A template whose `command` is `"cluster cnpg"` becomes
//! `inscribe cluster cnpg`. The first word names a parent command, the
//! last word the leaf. Every unique field becomes a `--<name>` flag.

use std::collections::{BTreeMap, HashMap};

use clap::{Arg, ArgMatches};

use crate::engine::Engine;
use crate::fields::{unique_fields, FieldDefinition, FieldKind};
use crate::registry::Registry;

use super::args::STATIC_COMMANDS;

/// Flag names owned by the CLI itself; fields with these names get no flag.
pub const RESERVED_FLAGS: &[&str] = &[
    "filename",
    "context",
    "kubeconfig",
    "help",
    "version",
    "template-dir",
    "output-dir",
    "config",
    "non-interactive",
    "no-color",
    "debug",
];

/// One leaf command and the template behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCommand {
    pub parent: String,
    pub leaf: String,
    pub template: String,
    pub description: String,
    /// Unique fields, in first-occurrence order.
    pub fields: Vec<FieldDefinition>,
}

impl TemplateCommand {
    /// Fields exposed as flags.
    pub fn flag_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| !RESERVED_FLAGS.contains(&f.name.as_str()))
    }

    /// Values of the field flags that were given.
    pub fn values_from(&self, matches: &ArgMatches) -> HashMap<String, String> {
        self.flag_fields()
            .filter_map(|f| {
                matches
                    .get_one::<String>(&f.name)
                    .map(|v| (f.name.clone(), v.clone()))
            })
            .collect()
    }
}

/// Leaf commands for every template with a two-word (or longer) command.
///
/// Templates are visited in name order. A parent that would shadow a
/// built-in command, or a second template for the same parent and leaf,
/// is skipped with a warning.
pub fn collect(registry: &Registry) -> Vec<TemplateCommand> {
    let engine = Engine::new(registry);
    let mut commands: Vec<TemplateCommand> = Vec::new();

    for template in registry.list_templates() {
        let words = template.command_words();
        let (Some(parent), Some(leaf)) = (words.first(), words.last()) else {
            continue;
        };
        if words.len() < 2 {
            tracing::debug!(
                "Template {} has a one-word command, reachable via generate only",
                template.name
            );
            continue;
        }
        if STATIC_COMMANDS.contains(parent) {
            tracing::warn!(
                "Template {} uses reserved command '{}', skipping",
                template.name,
                parent
            );
            continue;
        }
        if commands.iter().any(|c| c.parent == *parent && c.leaf == *leaf) {
            tracing::warn!(
                "Command '{} {}' is already taken, skipping template {}",
                parent,
                leaf,
                template.name
            );
            continue;
        }

        let fields = match engine.extract_fields(&template.name) {
            Ok(fields) => unique_fields(&fields),
            Err(e) => {
                tracing::warn!("Could not read fields of {}: {}", template.name, e);
                Vec::new()
            }
        };

        commands.push(TemplateCommand {
            parent: parent.to_string(),
            leaf: leaf.to_string(),
            template: template.name.clone(),
            description: template.description.clone(),
            fields,
        });
    }

    commands
}

/// Build clap parent commands, sorted by name, each holding its leaves.
pub fn build_commands(registry: &Registry, commands: &[TemplateCommand]) -> Vec<clap::Command> {
    let mut parents: BTreeMap<&str, Vec<&TemplateCommand>> = BTreeMap::new();
    for command in commands {
        parents.entry(&command.parent).or_default().push(command);
    }

    parents
        .into_iter()
        .map(|(parent, leaves)| {
            let mut cmd = clap::Command::new(parent.to_string())
                .about(format!("Generate {} manifests", parent));
            for leaf in leaves {
                cmd = cmd.subcommand(build_leaf(registry, leaf));
            }
            cmd
        })
        .collect()
}

fn build_leaf(registry: &Registry, command: &TemplateCommand) -> clap::Command {
    let mut cmd = clap::Command::new(command.leaf.clone()).about(command.description.clone());
    for field in command.flag_fields() {
        cmd = cmd.arg(
            Arg::new(field.name.clone())
                .long(field.name.clone())
                .value_name("VALUE")
                .help(flag_description(registry, field)),
        );
    }
    cmd.arg(Arg::new("filename").long("filename").help("Output filename"))
        .arg(Arg::new("context").long("context").help("Kubernetes context"))
        .arg(
            Arg::new("kubeconfig")
                .long("kubeconfig")
                .value_name("FILE")
                .help("Path to kubeconfig file"),
        )
}

/// Help text for a field flag.
pub fn flag_description(registry: &Registry, field: &FieldDefinition) -> String {
    match &field.kind {
        FieldKind::Manual { validation } => {
            format!("Value for {} (validated as {})", field.name, validation)
        }
        FieldKind::AutoDetect { source } => {
            format!("Value for {} (listed from the cluster if omitted)", source)
        }
        FieldKind::TemplateGroup { group } => match registry.get_sub_templates(group) {
            Ok(subs) => {
                let options: Vec<String> =
                    subs.iter().map(|s| format!("\"{}\"", s.description)).collect();
                format!("One of: {}", options.join(", "))
            }
            Err(_) => format!("Template group: {}", group),
        },
        FieldKind::List { list } => match registry.get_static_list(list) {
            Ok(list) => format!("One of: {}", list.items.join(", ")),
            Err(_) => format!("Static list: {}", list),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, content: &str) {
        fs::write(dir.path().join(file), content).unwrap();
    }

    fn registry_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(
            &temp,
            "cnpg.yaml",
            "{# inscribe: type=\"template\" name=\"cnpg-cluster\" command=\"cluster cnpg\" description=\"CNPG cluster\" #}\n\
             name: {{ manual(name=\"name\", kind=\"dns-name\") }}\n\
             namespace: {{ auto_detect(source=\"namespace\") }}\n\
             size: {{ template_group(group=\"sizes\") }}\n\
             method: {{ static_list(name=\"methods\") }}\n\
             again: {{ manual(name=\"name\", kind=\"dns-name\") }}\n",
        );
        write(
            &temp,
            "redis.yaml",
            "{# inscribe: type=\"template\" name=\"redis\" command=\"cluster redis\" description=\"Redis\" #}\n\
             name: {{ manual(name=\"name\", kind=\"dns-name\") }}\n\
             ctx: {{ auto_detect(source=\"context\") }}\n",
        );
        write(
            &temp,
            "backup.yaml",
            "{# inscribe: type=\"template\" name=\"backup\" command=\"backup cnpg\" description=\"Backup\" #}\n\
             cluster: {{ auto_detect(source=\"cnpg-clusters\") }}\n",
        );
        write(
            &temp,
            "single.yaml",
            "{# inscribe: type=\"template\" name=\"single\" command=\"single\" description=\"One word\" #}\nx: 1\n",
        );
        write(
            &temp,
            "small.yaml",
            "{# inscribe: type=\"sub-template\" group=\"sizes\" description=\"Small\" #}\nmemory: 1Gi",
        );
        write(
            &temp,
            "methods.yaml",
            "{# inscribe: type=\"list\" name=\"methods\" #}\n- a\n- b\n",
        );
        temp
    }

    #[test]
    fn builds_parent_and_leaf_tree() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();
        let commands = collect(&registry);
        let built = build_commands(&registry, &commands);

        let parents: Vec<_> = built.iter().map(|c| c.get_name().to_string()).collect();
        assert_eq!(parents, vec!["backup", "cluster"]);

        let cluster = built.iter().find(|c| c.get_name() == "cluster").unwrap();
        let leaves: Vec<_> = cluster.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(leaves, vec!["cnpg", "redis"]);
    }

    #[test]
    fn one_word_commands_are_skipped() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();
        assert!(collect(&registry).iter().all(|c| c.template != "single"));
    }

    #[test]
    fn fields_become_unique_flags() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();
        let commands = collect(&registry);
        let cnpg = commands.iter().find(|c| c.template == "cnpg-cluster").unwrap();

        let names: Vec<_> = cnpg.flag_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "namespace", "sizes", "methods"]);

        let built = build_commands(&registry, &commands);
        let leaf = built
            .iter()
            .find(|c| c.get_name() == "cluster")
            .and_then(|c| c.find_subcommand("cnpg"))
            .unwrap();
        let longs: Vec<_> = leaf.get_arguments().filter_map(|a| a.get_long()).collect();
        assert_eq!(
            longs,
            vec!["name", "namespace", "sizes", "methods", "filename", "context", "kubeconfig"]
        );
    }

    #[test]
    fn context_field_reuses_context_flag() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();
        let commands = collect(&registry);
        let redis = commands.iter().find(|c| c.template == "redis").unwrap();

        assert_eq!(redis.fields.len(), 2);
        let names: Vec<_> = redis.flag_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn reserved_parent_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(
            &temp,
            "bad.yaml",
            "{# inscribe: type=\"template\" name=\"bad\" command=\"list all\" description=\"x\" #}\nx: 1\n",
        );
        let registry = Registry::new(temp.path()).unwrap();
        assert!(collect(&registry).is_empty());
    }

    #[test]
    fn duplicate_leaf_keeps_first_by_name() {
        let temp = TempDir::new().unwrap();
        write(
            &temp,
            "a.yaml",
            "{# inscribe: type=\"template\" name=\"alpha\" command=\"cluster pg\" description=\"A\" #}\nx: 1\n",
        );
        write(
            &temp,
            "b.yaml",
            "{# inscribe: type=\"template\" name=\"beta\" command=\"cluster pg\" description=\"B\" #}\nx: 2\n",
        );
        let registry = Registry::new(temp.path()).unwrap();
        let commands = collect(&registry);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].template, "alpha");
    }

    #[test]
    fn parsed_flags_become_values() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();
        let commands = collect(&registry);
        let cnpg = commands.iter().find(|c| c.template == "cnpg-cluster").unwrap();

        let matches = build_leaf(&registry, cnpg)
            .try_get_matches_from(["cnpg", "--name", "orders", "--methods", "b"])
            .unwrap();
        let values = cnpg.values_from(&matches);
        assert_eq!(values.len(), 2);
        assert_eq!(values["name"], "orders");
        assert_eq!(values["methods"], "b");
    }

    #[test]
    fn flag_descriptions_by_kind() {
        let temp = registry_dir();
        let registry = Registry::new(temp.path()).unwrap();

        assert_eq!(
            flag_description(&registry, &FieldDefinition::manual("name", "dns-name", 0)),
            "Value for name (validated as dns-name)"
        );
        assert_eq!(
            flag_description(&registry, &FieldDefinition::auto_detect("namespace", 0)),
            "Value for namespace (listed from the cluster if omitted)"
        );
        assert_eq!(
            flag_description(&registry, &FieldDefinition::template_group("sizes", 0)),
            "One of: \"Small\""
        );
        assert_eq!(
            flag_description(&registry, &FieldDefinition::list("methods", 0)),
            "One of: a, b"
        );
        assert_eq!(
            flag_description(&registry, &FieldDefinition::list("nope", 0)),
            "Static list: nope"
        );
    }
}
