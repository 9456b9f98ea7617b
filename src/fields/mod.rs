//! Field model.
//!
//! A template declares its own inputs through field directives. Each
//! occurrence becomes a [`FieldDefinition`]; the [`FieldKind`] says how the
//! value is obtained. Manual values are checked by the validator set in
//! [`validation`], which is backed by the validated wrappers in [`value`].

pub mod definition;
pub mod validation;
pub mod value;

pub use definition::{unique_fields, FieldDefinition, FieldKind};
pub use validation::{validate, validation_kinds, validator, Validator};
pub use value::{
    parse_value, CpuQuantity, CronSchedule, DnsName, Filename, FsPath, MemoryQuantity,
    NonEmptyString, NonNegativeInteger, Port, ValidatedValue, ValueError,
};
