//! Integration tests for the registry public API.

use inscribe::registry::Registry;
use inscribe::InscribeError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bundled() -> Registry {
    Registry::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")).unwrap()
}

#[test]
fn bundled_templates_are_listed_by_name() {
    let registry = bundled();
    let names: Vec<_> = registry
        .list_templates()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["cnpg-backup", "cnpg-cluster", "cnpg-pooler"]);
}

#[test]
fn command_prefix_is_a_plain_string_prefix() {
    let registry = bundled();
    let names: Vec<_> = registry
        .list_templates_by_command_prefix("clu")
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["cnpg-cluster", "cnpg-pooler"]);
}

#[test]
fn fragments_follow_walk_order() {
    let registry = bundled();
    let descriptions: Vec<_> = registry
        .get_sub_templates("cnpg-resources")
        .unwrap()
        .iter()
        .map(|s| s.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec!["Medium - 2Gi/1CPU", "Production - 4Gi/2CPU", "Small - 1Gi/500m"]
    );
}

#[test]
fn static_list_items_in_file_order() {
    let registry = bundled();
    let list = registry.get_static_list("backup-methods").unwrap();
    assert_eq!(list.items, vec!["barmanObjectStore", "volumeSnapshot", "plugin"]);
}

#[test]
fn unknown_names_fail_with_not_found() {
    let registry = bundled();
    assert!(registry.get_template("missing").unwrap_err().is_not_found());
    assert!(registry.get_sub_templates("missing").unwrap_err().is_not_found());
    assert!(registry.get_static_list("missing").unwrap_err().is_not_found());
}

#[test]
fn missing_root_is_a_scan_failure() {
    let temp = TempDir::new().unwrap();
    let err = Registry::new(temp.path().join("absent")).unwrap_err();
    assert!(matches!(err, InscribeError::ScanFailure { .. }));
}

#[test]
fn duplicate_names_keep_the_last_in_walk_order() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a")).unwrap();
    fs::create_dir_all(temp.path().join("b")).unwrap();
    fs::write(
        temp.path().join("a/one.yaml"),
        "{# inscribe: type=\"template\" name=\"dup\" command=\"x first\" description=\"first\" #}\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("b/two.yml"),
        "{# inscribe: type=\"template\" name=\"dup\" command=\"x second\" description=\"second\" #}\n",
    )
    .unwrap();

    let registry = Registry::new(temp.path()).unwrap();
    assert_eq!(registry.list_templates().len(), 1);
    assert_eq!(registry.get_template("dup").unwrap().description, "second");
}

#[test]
fn non_template_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# notes\n").unwrap();
    fs::write(temp.path().join("plain.yaml"), "kind: ConfigMap\n").unwrap();

    let registry = Registry::new(temp.path()).unwrap();
    assert!(registry.is_empty());
}
