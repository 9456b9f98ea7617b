//! Template registry for Inscribe.
//!
//! The registry scans a directory tree for template files and sorts each
//! one into a catalog by its header line:
//! - Primary templates (`type="template"`), keyed by name
//! - Fragments (`type="sub-template"`), grouped by `group`
//! - Static lists (`type="list"`), keyed by name
//!
//! Files without a header are not templates and are ignored.
//!
//! # Example
//!
//! ```no_run
//! use inscribe::registry::Registry;
//!
//! let registry = Registry::new("templates").unwrap();
//! for template in registry.list_templates() {
//!     println!("{} ({})", template.name, template.command);
//! }
//! ```

pub mod catalog;
pub mod header;
pub mod meta;

// Re-exports
pub use catalog::Registry;
pub use header::{is_header, strip_header, Header};
pub use meta::{StaticListMeta, SubTemplateMeta, TemplateMeta};
