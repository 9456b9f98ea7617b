//! Command-line interface for Inscribe.
//!
//! # Architecture
//!
//! - [`args`] - Static argument definitions using clap derive macros
//! - [`dynamic`] - Commands built from the template registry
//! - [`app`] - Two-stage parsing and settings
//! - [`commands`] - Command implementations

pub mod app;
pub mod args;
pub mod commands;
pub mod dynamic;

pub use app::{bootstrap_globals, load_settings, App, Invocation};
pub use args::{
    Cli, Commands, CompletionsArgs, EnvArgs, FieldsArgs, GenerateArgs, GlobalArgs, ListArgs,
    TargetArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use dynamic::TemplateCommand;
