//! Catalog header parsing.
//!
//! The first line of a catalog file is a template comment carrying
//! `key="value"` pairs:
//!
//! ```text
//! {# inscribe: type="template" name="cnpg-cluster" command="cluster cnpg" description="CNPG cluster" #}
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches the comment wrapper and captures the pair list.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{#-?\s*inscribe:\s*(.+?)\s*-?#\}"#).expect("HEADER_REGEX must compile")
});

/// Matches one `key="value"` pair.
static PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("PAIR_REGEX must compile"));

/// Parsed header pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pairs: HashMap<String, String>,
}

impl Header {
    /// Parse a header line. `None` when the line is not a header.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADER_REGEX.captures(line)?;
        let body = caps.get(1)?.as_str();
        let pairs: HashMap<String, String> = PAIR_REGEX
            .captures_iter(body)
            .map(|kv| (kv[1].to_string(), kv[2].to_string()))
            .collect();
        if pairs.is_empty() {
            return None;
        }
        Some(Self { pairs })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Value for `key`, empty when absent.
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn kind(&self) -> Option<&str> {
        self.get("type")
    }
}

/// Whether `line` is a catalog header.
pub fn is_header(line: &str) -> bool {
    HEADER_REGEX.is_match(line)
}

/// Remove the first line when it is a catalog header.
pub fn strip_header(content: &str) -> &str {
    match content.split_once('\n') {
        Some((first, rest)) if is_header(first) => rest,
        _ => content,
    }
}
