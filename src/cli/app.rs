//! Application wiring: settings, the command tree and parsing.
//!
//! Template commands depend on the template directory, which itself can be
//! set on the command line. Arguments are therefore parsed twice: a
//! tolerant pass over the global flags locates the registry, then the full
//! tree (static plus template commands) parses for real.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches};

use crate::config::{load_config, Settings};
use crate::error::Result;
use crate::registry::Registry;
use crate::ui::UserInterface;

use super::args::{Cli, Commands, GlobalArgs, TargetArgs, STATIC_COMMANDS};
use super::commands::{CommandDispatcher, CommandResult};
use super::dynamic::{self, TemplateCommand};

/// What the user asked for.
#[derive(Debug)]
pub enum Invocation {
    /// A built-in subcommand.
    Static(Commands),
    /// A template leaf command such as `inscribe cluster cnpg`.
    Template {
        template: String,
        values: HashMap<String, String>,
        target: TargetArgs,
    },
    /// A parent command invoked without a leaf.
    Parent { parent: String },
}

/// Global flags found before the first subcommand.
///
/// Never fails; anything unrecognised is ignored.
pub fn bootstrap_globals<I, T>(args: I) -> GlobalArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cmd = GlobalArgs::augment_args(clap::Command::new("inscribe"))
        .ignore_errors(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .allow_external_subcommands(true);

    cmd.try_get_matches_from(args)
        .ok()
        .and_then(|matches| GlobalArgs::from_arg_matches(&matches).ok())
        .unwrap_or_default()
}

/// Layer the config file, environment and flags into settings.
pub fn load_settings(global: &GlobalArgs, cwd: &Path) -> Result<Settings> {
    let file = load_config(global.config.as_deref(), cwd)?;
    let mut settings = Settings::resolve(file, global.overrides());
    settings.template_dir = absolute_from(cwd, settings.template_dir);
    settings.output_dir = absolute_from(cwd, settings.output_dir);
    Ok(settings)
}

fn absolute_from(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// The command tree for one template directory.
pub struct App {
    cwd: PathBuf,
    registry: Option<Registry>,
    templates: Vec<TemplateCommand>,
}

impl App {
    /// Scan the template directory named by the early flags.
    ///
    /// A directory that cannot be scanned simply yields no template commands;
    /// the built-in commands report the problem when they need the registry.
    pub fn new(cwd: &Path, early: &GlobalArgs) -> Self {
        let registry = load_settings(early, cwd)
            .and_then(|settings| Registry::new(&settings.template_dir))
            .inspect_err(|e| tracing::debug!("No template commands: {}", e))
            .ok();
        let templates = registry.as_ref().map(dynamic::collect).unwrap_or_default();

        Self {
            cwd: cwd.to_path_buf(),
            registry,
            templates,
        }
    }

    pub fn templates(&self) -> &[TemplateCommand] {
        &self.templates
    }

    /// Static commands plus one parent per template command prefix.
    pub fn command(&self) -> clap::Command {
        let mut cmd = Cli::command();
        if let Some(registry) = &self.registry {
            for parent in dynamic::build_commands(registry, &self.templates) {
                cmd = cmd.subcommand(parent);
            }
        }
        cmd
    }

    /// Parse arguments against the full tree.
    pub fn try_parse<I, T>(&self, args: I) -> std::result::Result<(GlobalArgs, Invocation), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        let global = GlobalArgs::from_arg_matches(&matches)?;

        let invocation = match matches.subcommand() {
            Some((name, _)) if STATIC_COMMANDS.contains(&name) => {
                Invocation::Static(Cli::from_arg_matches(&matches)?.command)
            }
            Some((parent, parent_matches)) => match parent_matches.subcommand() {
                Some((leaf, leaf_matches)) => self.template_invocation(parent, leaf, leaf_matches)?,
                None => Invocation::Parent {
                    parent: parent.to_string(),
                },
            },
            None => {
                return Err(self
                    .command()
                    .error(clap::error::ErrorKind::MissingSubcommand, "a subcommand is required"))
            }
        };

        Ok((global, invocation))
    }

    /// Parse, printing help or usage errors and exiting like clap does.
    pub fn parse<I, T>(&self, args: I) -> (GlobalArgs, Invocation)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_parse(args).unwrap_or_else(|e| e.exit())
    }

    fn template_invocation(
        &self,
        parent: &str,
        leaf: &str,
        matches: &ArgMatches,
    ) -> std::result::Result<Invocation, clap::Error> {
        let command = self
            .templates
            .iter()
            .find(|c| c.parent == parent && c.leaf == leaf)
            .ok_or_else(|| {
                self.command().error(
                    clap::error::ErrorKind::InvalidSubcommand,
                    format!("unknown command '{} {}'", parent, leaf),
                )
            })?;

        Ok(Invocation::Template {
            template: command.template.clone(),
            values: command.values_from(matches),
            target: TargetArgs {
                filename: matches.get_one::<String>("filename").cloned(),
                context: matches.get_one::<String>("context").cloned(),
                kubeconfig: matches.get_one::<String>("kubeconfig").map(PathBuf::from),
            },
        })
    }

    /// Run a parsed invocation.
    pub fn run(
        self,
        global: &GlobalArgs,
        invocation: Invocation,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let settings = load_settings(global, &self.cwd)?;
        tracing::debug!("Settings: {:?}", settings);

        let command = self.command();
        CommandDispatcher::new(settings, command)
            .with_registry(self.registry)
            .dispatch(invocation, ui)
    }
}
