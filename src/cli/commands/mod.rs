//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands that
//! read templates borrow the [`Registry`](crate::registry::Registry) they
//! are given rather than scanning on their own.

pub mod completions;
pub mod dispatcher;
pub mod env;
pub mod fields;
pub mod generate;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
