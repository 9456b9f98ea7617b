//! Inscribe - Generate configuration manifests from self-describing templates.
//!
//! Templates declare their own inputs. A template body calls field
//! directives such as `manual(name="name", kind="dns-name")`; evaluating
//! it once with recording directives yields the field list, evaluating it
//! again with lookup directives renders the final document.
//!
//! # Modules
//!
//! - [`registry`] - Template discovery and catalog lookups
//! - [`engine`] - Field extraction and rendering
//! - [`fields`] - Field definitions, validators and validated values
//! - [`resolve`] - Turning flags and prompts into render values
//! - [`cluster`] - Kubernetes introspection for auto-detected fields
//! - [`writer`] - Writing rendered manifests
//! - [`config`] - Settings file and layering
//! - [`cli`] - Command-line interface
//! - [`ui`] - Prompts, spinners and terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use inscribe::engine::{extract_from_str, render_str};
//! use std::collections::HashMap;
//!
//! let source = "name: {{ manual(name=\"name\", kind=\"dns-name\") }}\n";
//! let fields = extract_from_str("example", source).unwrap();
//! assert_eq!(fields[0].name, "name");
//!
//! let values = HashMap::from([("name".to_string(), "orders".to_string())]);
//! assert_eq!(render_str("example", source, &values).unwrap(), "name: orders\n");
//! ```

pub mod cli;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod fields;
pub mod platform;
pub mod registry;
pub mod resolve;
pub mod ui;
pub mod writer;

pub use error::{InscribeError, Result};
