//! Directive functions and the `indent` filter registered with Tera.
//!
//! The same four directives are registered twice over the life of a
//! template: once as extractors that record a [`FieldDefinition`] and
//! return a placeholder, once as lookups into the resolved value map.

use crate::fields::FieldDefinition;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tera::{Tera, Value};

/// Fields recorded by the extraction pass, in call order.
pub type Collector = Arc<Mutex<Vec<FieldDefinition>>>;

/// A field-producing directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Manual,
    AutoDetect,
    TemplateGroup,
    StaticList,
}

impl Directive {
    pub const ALL: [Directive; 4] = [
        Directive::Manual,
        Directive::AutoDetect,
        Directive::TemplateGroup,
        Directive::StaticList,
    ];

    /// Name of the function as called from a template.
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AutoDetect => "auto_detect",
            Self::TemplateGroup => "template_group",
            Self::StaticList => "static_list",
        }
    }

    /// Build the field this call declares.
    pub fn field(self, args: &HashMap<String, Value>, order: usize) -> tera::Result<FieldDefinition> {
        Ok(match self {
            Self::Manual => FieldDefinition::manual(
                self.string_arg(args, "name")?,
                self.string_arg(args, "kind")?,
                order,
            ),
            Self::AutoDetect => FieldDefinition::auto_detect(self.string_arg(args, "source")?, order),
            Self::TemplateGroup => {
                FieldDefinition::template_group(self.string_arg(args, "group")?, order)
            }
            Self::StaticList => FieldDefinition::list(self.string_arg(args, "name")?, order),
        })
    }

    fn string_arg(self, args: &HashMap<String, Value>, key: &str) -> tera::Result<String> {
        match args.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(tera::Error::msg(format!(
                "{}(): argument '{}' must be a string, got {}",
                self.function_name(),
                key,
                other
            ))),
            None => Err(tera::Error::msg(format!(
                "{}(): missing argument '{}'",
                self.function_name(),
                key
            ))),
        }
    }
}

/// Inert value returned by the extraction pass for a field.
pub fn placeholder(name: &str) -> String {
    format!("__PLACEHOLDER_{}__", name)
}

/// Register the recording variants of every directive.
pub fn register_extractors(tera: &mut Tera, collector: &Collector) {
    for directive in Directive::ALL {
        let collector = Arc::clone(collector);
        tera.register_function(
            directive.function_name(),
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let mut fields = collector
                    .lock()
                    .map_err(|_| tera::Error::msg("field collector lock poisoned"))?;
                let field = directive.field(args, fields.len())?;
                let value = placeholder(&field.name);
                fields.push(field);
                Ok(Value::String(value))
            },
        );
    }
}

/// Register the lookup variants of every directive.
///
/// Unknown keys render as empty text.
pub fn register_renderers(tera: &mut Tera, values: &Arc<HashMap<String, String>>) {
    for directive in Directive::ALL {
        let values = Arc::clone(values);
        tera.register_function(
            directive.function_name(),
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let field = directive.field(args, 0)?;
                let value = values.get(&field.name).cloned().unwrap_or_default();
                Ok(Value::String(value))
            },
        );
    }
}

/// `indent(width=N)`: prefix every non-empty line with N spaces.
pub fn indent(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let width = match args.get("width") {
        Some(w) => w
            .as_u64()
            .ok_or_else(|| tera::Error::msg(format!("indent: width must be a non-negative integer, got {}", w)))?,
        None => return Err(tera::Error::msg("indent: missing argument 'width'")),
    };

    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(Value::String(indent_text(&text, width as usize)))
}

/// Line-wise indentation; empty lines are left untouched.
pub fn indent_text(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
