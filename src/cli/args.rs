//! CLI argument definitions.
//!
//! The static surface is defined with clap's derive macros. Commands built
//! from the template registry are added at runtime, see [`super::dynamic`].

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Overrides;

/// Inscribe - Generate configuration manifests from self-describing templates.
#[derive(Debug, Parser)]
#[command(name = "inscribe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct GlobalArgs {
    /// Template directory [default: templates]
    #[arg(long, global = true, env = "INSCRIBE_TEMPLATE_DIR", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Directory generated manifests are written to [default: .]
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to config file (overrides ./.inscribe.yml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never prompt; fail when a value is missing
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Settings overrides carried by these flags.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            template_dir: self.template_dir.clone(),
            output_dir: self.output_dir.clone(),
            ..Default::default()
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available templates
    List(ListArgs),

    /// Show the fields a template asks for
    Fields(FieldsArgs),

    /// Generate a manifest from any template by name
    Generate(GenerateArgs),

    /// Print shell configuration for INSCRIBE_TEMPLATE_DIR
    Env(EnvArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Names of the static subcommands.
pub const STATIC_COMMANDS: &[&str] = &["list", "fields", "generate", "env", "completions", "help"];

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only show templates whose command starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Arguments for the `fields` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FieldsArgs {
    /// Template name
    pub template: String,

    /// Print the fields as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// Template name
    pub template: String,

    /// Field value, repeatable
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// Flags shared by `generate` and the template commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct TargetArgs {
    /// Output filename [default: <template>.yaml]
    #[arg(long)]
    pub filename: Option<String>,

    /// Kubernetes context
    #[arg(long)]
    pub context: Option<String>,

    /// Path to kubeconfig file
    #[arg(long, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Template directory to export (defaults to the configured one)
    pub path: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse `name=value`. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}
