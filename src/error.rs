//! Error types for Inscribe operations.
//!
//! This module defines [`InscribeError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! Every variant carries the name of the template, field, value or path
//! that triggered it, so a failure can always be traced back to its input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Inscribe operations.
#[derive(Debug, Error)]
pub enum InscribeError {
    /// Unknown template, sub-template group or static list.
    #[error("{what} '{name}' not found")]
    NotFound { what: &'static str, name: String },

    /// Directory walk or file read failed while building the registry.
    #[error("Failed to scan templates at {path}: {message}")]
    ScanFailure { path: PathBuf, message: String },

    /// A template file could not be read at extraction or render time.
    #[error("Failed to read template '{template}' from {path}: {message}")]
    ReadFailure {
        template: String,
        path: PathBuf,
        message: String,
    },

    /// Template syntax or evaluation error.
    #[error("Template '{template}' failed: {message}")]
    ParseFailure { template: String, message: String },

    /// A manual value failed its validator.
    #[error("Invalid value '{value}' for '{field}': {message}")]
    ValidationError {
        field: String,
        value: String,
        message: String,
    },

    /// A manual field names a validation kind that does not exist.
    #[error("Unknown validation type: '{kind}'")]
    UnknownValidation { kind: String },

    /// A group or list selection matched no known option.
    #[error("No option '{value}' for '{field}' (available: {})", .options.join(", "))]
    ResolutionError {
        field: String,
        value: String,
        options: Vec<String>,
    },

    /// Fields left without a value in non-interactive mode.
    #[error("Missing values for: {}", .names.join(", "))]
    MissingValues { names: Vec<String> },

    /// Cluster introspection failed.
    #[error("Cluster query '{command}' failed: {message}")]
    ClusterError { command: String, message: String },

    /// Writing the rendered manifest failed.
    #[error("Failed to write {path}: {message}")]
    WriteFailure { path: PathBuf, message: String },

    /// An explicitly named configuration file does not exist.
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InscribeError {
    /// Shorthand for a [`InscribeError::NotFound`].
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    /// Whether this error is a [`InscribeError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for Inscribe operations.
pub type Result<T> = std::result::Result<T, InscribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_kind_and_name() {
        let err = InscribeError::not_found("template", "missing");
        assert_eq!(err.to_string(), "template 'missing' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn scan_failure_displays_path() {
        let err = InscribeError::ScanFailure {
            path: PathBuf::from("/templates"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/templates"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn parse_failure_displays_template() {
        let err = InscribeError::ParseFailure {
            template: "cnpg-cluster".into(),
            message: "unexpected token".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cnpg-cluster"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn validation_error_displays_field_and_value() {
        let err = InscribeError::ValidationError {
            field: "name".into(),
            value: "MyDB".into(),
            message: "must be lowercase".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("MyDB"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn resolution_error_lists_options() {
        let err = InscribeError::ResolutionError {
            field: "backup-method".into(),
            value: "tape".into(),
            options: vec!["barmanObjectStore".into(), "volumeSnapshot".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("tape"));
        assert!(msg.contains("barmanObjectStore, volumeSnapshot"));
    }

    #[test]
    fn missing_values_lists_names() {
        let err = InscribeError::MissingValues {
            names: vec!["name".into(), "namespace".into()],
        };
        assert_eq!(err.to_string(), "Missing values for: name, namespace");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InscribeError = io_err.into();
        assert!(matches!(err, InscribeError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: InscribeError = anyhow::anyhow!("something went wrong").into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
