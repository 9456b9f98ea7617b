//! The template catalog built from one directory scan.

use crate::error::{InscribeError, Result};
use crate::registry::header::Header;
use crate::registry::meta::{StaticListMeta, SubTemplateMeta, TemplateMeta};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only catalog of templates, fragments and static lists.
///
/// Built once by [`Registry::new`]. A fresh scan is the only way to see
/// changes on disk.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    root: PathBuf,
    templates: BTreeMap<String, TemplateMeta>,
    sub_templates: BTreeMap<String, Vec<SubTemplateMeta>>,
    static_lists: BTreeMap<String, StaticListMeta>,
}

impl Registry {
    /// Scan `dir` recursively and classify every template file.
    ///
    /// Entries are visited in file-name order, so when two templates or
    /// lists share a name the later one in that order wins. Symlinked files
    /// are read through their link; symlinked directories are not entered.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        let mut registry = Self {
            root: root.clone(),
            ..Self::default()
        };

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| InscribeError::ScanFailure {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                message: e.to_string(),
            })?;

            let is_file = if entry.path_is_symlink() {
                entry.path().is_file()
            } else {
                entry.file_type().is_file()
            };
            if !is_file || !is_template_file(entry.path()) {
                continue;
            }

            registry.load_file(entry.path())?;
        }

        tracing::debug!(
            "Scanned {}: {} templates, {} groups, {} lists",
            root.display(),
            registry.templates.len(),
            registry.sub_templates.len(),
            registry.static_lists.len()
        );

        Ok(registry)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let scan_err = |e: std::io::Error| InscribeError::ScanFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut reader = BufReader::new(File::open(path).map_err(scan_err)?);

        // Raw bytes: files that are not UTF-8 simply fail the header match.
        let mut first = Vec::new();
        reader.read_until(b'\n', &mut first).map_err(scan_err)?;
        let first = String::from_utf8_lossy(&first);
        let Some(header) = Header::parse(first.trim_end_matches(['\n', '\r'])) else {
            return Ok(());
        };

        let mut raw_body = Vec::new();
        reader.read_to_end(&mut raw_body).map_err(scan_err)?;
        let Ok(body) = String::from_utf8(raw_body) else {
            tracing::warn!("Skipping {}: body is not valid UTF-8", path.display());
            return Ok(());
        };
        let lines = body.lines();

        match header.kind() {
            Some("template") => {
                let Some(name) = required(&header, "name", path) else {
                    return Ok(());
                };
                let meta = TemplateMeta {
                    name: name.clone(),
                    command: header.get_or_empty("command"),
                    description: header.get_or_empty("description"),
                    path: path.to_path_buf(),
                };
                if let Some(previous) = self.templates.insert(name.clone(), meta) {
                    tracing::warn!(
                        "Template '{}' from {} overrides {}",
                        name,
                        path.display(),
                        previous.path.display()
                    );
                }
            }
            Some("sub-template") => {
                let Some(group) = required(&header, "group", path) else {
                    return Ok(());
                };
                let content = lines.collect::<Vec<_>>().join("\n");
                self.sub_templates
                    .entry(group.clone())
                    .or_default()
                    .push(SubTemplateMeta {
                        group,
                        description: header.get_or_empty("description"),
                        content,
                        path: path.to_path_buf(),
                    });
            }
            Some("list") => {
                let Some(name) = required(&header, "name", path) else {
                    return Ok(());
                };
                let mut items = Vec::new();
                for line in lines {
                    if let Some(item) = line.trim().strip_prefix("- ") {
                        items.push(item.to_string());
                    }
                }
                let meta = StaticListMeta {
                    name: name.clone(),
                    items,
                    path: path.to_path_buf(),
                };
                if let Some(previous) = self.static_lists.insert(name.clone(), meta) {
                    tracing::warn!(
                        "List '{}' from {} overrides {}",
                        name,
                        path.display(),
                        previous.path.display()
                    );
                }
            }
            other => {
                tracing::warn!(
                    "Skipping {}: unknown header type {:?}",
                    path.display(),
                    other.unwrap_or("")
                );
            }
        }

        Ok(())
    }

    /// Directory this registry was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a primary template.
    pub fn get_template(&self, name: &str) -> Result<&TemplateMeta> {
        self.templates
            .get(name)
            .ok_or_else(|| InscribeError::not_found("template", name))
    }

    /// All fragments of a group, in scan order.
    pub fn get_sub_templates(&self, group: &str) -> Result<&[SubTemplateMeta]> {
        self.sub_templates
            .get(group)
            .filter(|subs| !subs.is_empty())
            .map(Vec::as_slice)
            .ok_or_else(|| InscribeError::not_found("sub-template group", group))
    }

    /// Look up a static list.
    pub fn get_static_list(&self, name: &str) -> Result<&StaticListMeta> {
        self.static_lists
            .get(name)
            .ok_or_else(|| InscribeError::not_found("static list", name))
    }

    /// All primary templates, ordered by name.
    pub fn list_templates(&self) -> Vec<&TemplateMeta> {
        self.templates.values().collect()
    }

    /// Templates whose command starts with `prefix`, ordered by name.
    ///
    /// Plain string prefix: `"clu"` matches `"cluster cnpg"`.
    pub fn list_templates_by_command_prefix(&self, prefix: &str) -> Vec<&TemplateMeta> {
        self.templates
            .values()
            .filter(|t| t.command.starts_with(prefix))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn required(header: &Header, key: &str, path: &Path) -> Option<String> {
    match header.get(key) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            tracing::warn!(
                "Skipping {}: header is missing '{}'",
                path.display(),
                key
            );
            None
        }
    }
}
