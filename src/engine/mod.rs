//! Two-pass template engine.
//!
//! A template declares its own inputs. The extraction pass evaluates it
//! with recording directives to discover its fields; the render pass
//! evaluates it again with lookup directives to produce the final text.
//!
//! ```
//! use inscribe::engine::{extract_from_str, render_str};
//! use std::collections::HashMap;
//!
//! let source = "name: {{ manual(name=\"name\", kind=\"dns-name\") }}\n";
//! let fields = extract_from_str("demo", source).unwrap();
//! assert_eq!(fields[0].name, "name");
//!
//! let values = HashMap::from([("name".to_string(), "web".to_string())]);
//! assert_eq!(render_str("demo", source, &values).unwrap(), "name: web\n");
//! ```

pub mod functions;

pub use functions::{indent_text, placeholder, Directive};

use crate::error::{InscribeError, Result};
use crate::fields::FieldDefinition;
use crate::registry::{strip_header, Registry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tera::{Context, Tera};

/// Runs both passes against templates held by a [`Registry`].
///
/// Holds no state of its own; every call re-reads the template file.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    registry: &'a Registry,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Every field directive in the template, in call order.
    ///
    /// Repeated names are all reported; use
    /// [`unique_fields`](crate::fields::unique_fields) for one entry per key.
    pub fn extract_fields(&self, name: &str) -> Result<Vec<FieldDefinition>> {
        let source = self.load(name)?;
        let fields = extract_from_str(name, &source)?;
        tracing::debug!("Extracted {} fields from '{}'", fields.len(), name);
        Ok(fields)
    }

    /// Render the template with resolved values.
    ///
    /// Keys missing from `values` render as empty text.
    pub fn render(&self, name: &str, values: &HashMap<String, String>) -> Result<String> {
        let source = self.load(name)?;
        let output = render_str(name, &source, values)?;
        tracing::debug!("Rendered '{}' ({} bytes)", name, output.len());
        Ok(output)
    }

    fn load(&self, name: &str) -> Result<String> {
        let meta = self.registry.get_template(name)?;
        std::fs::read_to_string(&meta.path).map_err(|e| InscribeError::ReadFailure {
            template: name.to_string(),
            path: meta.path.clone(),
            message: e.to_string(),
        })
    }
}

/// Extraction pass over raw template text.
pub fn extract_from_str(template: &str, source: &str) -> Result<Vec<FieldDefinition>> {
    extract_with_skeleton(template, source).map(|(fields, _)| fields)
}

/// Render pass over raw template text.
pub fn render_str(template: &str, source: &str, values: &HashMap<String, String>) -> Result<String> {
    let mut tera = new_tera();
    functions::register_renderers(&mut tera, &Arc::new(values.clone()));
    evaluate(&mut tera, template, source)
}

/// Fields plus the text the extraction pass produced.
fn extract_with_skeleton(template: &str, source: &str) -> Result<(Vec<FieldDefinition>, String)> {
    let collector: functions::Collector = Arc::new(Mutex::new(Vec::new()));
    let mut tera = new_tera();
    functions::register_extractors(&mut tera, &collector);

    let skeleton = evaluate(&mut tera, template, source)?;

    let fields = collector
        .lock()
        .map(|fields| fields.clone())
        .map_err(|_| parse_failure(template, "field collector lock poisoned".to_string()))?;
    Ok((fields, skeleton))
}

fn new_tera() -> Tera {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.register_filter("indent", functions::indent);
    tera
}

fn evaluate(tera: &mut Tera, template: &str, source: &str) -> Result<String> {
    let body = strip_header(source);
    tera.add_raw_template(template, body)
        .map_err(|e| parse_failure(template, describe(&e)))?;
    tera.render(template, &Context::new())
        .map_err(|e| parse_failure(template, describe(&e)))
}

fn parse_failure(template: &str, message: String) -> InscribeError {
    InscribeError::ParseFailure {
        template: template.to_string(),
        message,
    }
}

/// Flatten a Tera error and its causes into one line.
fn describe(err: &tera::Error) -> String {
    use std::error::Error;

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
