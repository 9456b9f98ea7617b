//! Integration tests for the engine public API against the bundled templates.

use inscribe::engine::{extract_from_str, render_str, Engine};
use inscribe::fields::{unique_fields, FieldKind};
use inscribe::registry::Registry;
use std::collections::HashMap;
use std::path::Path;

fn bundled() -> Registry {
    Registry::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")).unwrap()
}

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn cnpg_cluster_fields_in_order() {
    let registry = bundled();
    let fields = Engine::new(&registry).extract_fields("cnpg-cluster").unwrap();

    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["name", "namespace", "instances", "cnpg-resources", "storage"]
    );
    assert_eq!(
        fields[3].kind,
        FieldKind::TemplateGroup {
            group: "cnpg-resources".into()
        }
    );
    assert!(fields.iter().enumerate().all(|(i, f)| f.order == i));
}

#[test]
fn extraction_is_deterministic() {
    let registry = bundled();
    let engine = Engine::new(&registry);
    for name in ["cnpg-cluster", "cnpg-pooler", "cnpg-backup"] {
        assert_eq!(
            engine.extract_fields(name).unwrap(),
            engine.extract_fields(name).unwrap()
        );
    }
}

#[test]
fn every_bundled_template_references_known_catalogs() {
    let registry = bundled();
    let engine = Engine::new(&registry);

    for template in registry.list_templates() {
        for field in unique_fields(&engine.extract_fields(&template.name).unwrap()) {
            match &field.kind {
                FieldKind::TemplateGroup { group } => {
                    assert!(registry.get_sub_templates(group).is_ok(), "{}", group)
                }
                FieldKind::List { list } => {
                    assert!(registry.get_static_list(list).is_ok(), "{}", list)
                }
                FieldKind::Manual { validation } => {
                    assert!(inscribe::fields::validator(validation).is_some(), "{}", validation)
                }
                FieldKind::AutoDetect { .. } => {}
            }
        }
    }
}

#[test]
fn renders_cnpg_cluster() {
    let registry = bundled();
    let engine = Engine::new(&registry);
    let production = registry
        .get_sub_templates("cnpg-resources")
        .unwrap()
        .iter()
        .find(|s| s.description == "Production - 4Gi/2CPU")
        .unwrap()
        .content
        .clone();

    let mut resolved = values(&[
        ("name", "orders"),
        ("namespace", "app-prod"),
        ("instances", "3"),
        ("storage", "10Gi"),
    ]);
    resolved.insert("cnpg-resources".into(), production);

    let rendered = engine.render("cnpg-cluster", &resolved).unwrap();
    insta::assert_snapshot!(rendered, @r#"
apiVersion: postgresql.cnpg.io/v1
kind: Cluster
metadata:
  name: orders
  namespace: app-prod
spec:
  instances: 3
  primaryUpdateStrategy: unsupervised
  resources:
    requests:
      memory: 4Gi
      cpu: "2"
    limits:
      memory: 4Gi
      cpu: "2"
  storage:
    size: 10Gi
  monitoring:
    enablePodMonitor: true
"#);
}

#[test]
fn manual_only_round_trip() {
    let source = "metadata:\n  name: {{ manual(name=\"name\", kind=\"dns-name\") }}\ndata:\n  key: {{ manual(name=\"value\", kind=\"string\") }}\n";

    let fields = extract_from_str("config", source).unwrap();
    assert_eq!(fields.len(), 2);

    let rendered = render_str(
        "config",
        source,
        &values(&[("name", "my-config"), ("value", "hello")]),
    )
    .unwrap();
    assert_eq!(rendered, "metadata:\n  name: my-config\ndata:\n  key: hello\n");
}

#[test]
fn skeleton_is_independent_of_values() {
    let registry = bundled();
    let engine = Engine::new(&registry);
    let first = values(&[
        ("name", "alpha-one"),
        ("namespace", "ns-first"),
        ("cnpg-clusters", "db-first"),
    ]);
    let second = values(&[
        ("name", "beta-two"),
        ("namespace", "ns-second-longer"),
        ("cnpg-clusters", "db-second"),
    ]);

    let strip = |rendered: String, vals: &HashMap<String, String>| {
        vals.values()
            .fold(rendered, |text, value| text.replace(value.as_str(), ""))
    };

    let a = strip(engine.render("cnpg-backup", &first).unwrap(), &first);
    let b = strip(engine.render("cnpg-backup", &second).unwrap(), &second);
    assert_eq!(a, b);
}

#[test]
fn missing_values_render_empty() {
    let registry = bundled();
    let rendered = Engine::new(&registry)
        .render("cnpg-backup", &HashMap::new())
        .unwrap();
    assert!(rendered.contains("  method: \n"));
    assert!(!rendered.contains("__PLACEHOLDER_"));
}
