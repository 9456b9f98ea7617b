//! Routing of parsed invocations to command implementations.

use crate::cli::app::Invocation;
use crate::cli::args::Commands;
use crate::cluster::KubectlClient;
use crate::config::Settings;
use crate::error::Result;
use crate::registry::Registry;
use crate::resolve::Request;
use crate::ui::UserInterface;
use crate::writer::FileWriter;

use super::completions::CompletionsCommand;
use super::env::EnvCommand;
use super::fields::FieldsCommand;
use super::generate::{select_template, GenerateCommand};
use super::list::ListCommand;

/// A runnable command. Errors are reported by the caller.
pub trait Command {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Outcome of a command that ran to completion.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    /// Process exit code.
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Routes invocations to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
    registry: Option<Registry>,
    command: clap::Command,
}

impl CommandDispatcher {
    /// `command` is the full command tree, used for completions.
    pub fn new(settings: Settings, command: clap::Command) -> Self {
        Self {
            settings,
            registry: None,
            command,
        }
    }

    /// Reuse an already scanned registry when it covers the configured directory.
    pub fn with_registry(mut self, registry: Option<Registry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn with_registry_for<T>(&self, run: impl FnOnce(&Registry) -> Result<T>) -> Result<T> {
        match &self.registry {
            Some(registry) if registry.root() == self.settings.template_dir => run(registry),
            _ => run(&Registry::new(&self.settings.template_dir)?),
        }
    }

    pub fn dispatch(
        &self,
        invocation: Invocation,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match invocation {
            Invocation::Static(Commands::List(args)) => {
                self.with_registry_for(|registry| ListCommand::new(registry, args).execute(ui))
            }
            Invocation::Static(Commands::Fields(args)) => {
                self.with_registry_for(|registry| FieldsCommand::new(registry, args).execute(ui))
            }
            Invocation::Static(Commands::Generate(args)) => {
                let request = Request {
                    template: args.template,
                    provided: args.set.into_iter().collect(),
                    filename: args.target.filename,
                    context: args.target.context,
                };
                self.generate(request, args.target.kubeconfig, ui)
            }
            Invocation::Static(Commands::Env(args)) => {
                let dir = args.path.unwrap_or_else(|| self.settings.template_dir.clone());
                EnvCommand::new(dir).execute(ui)
            }
            Invocation::Static(Commands::Completions(args)) => {
                CompletionsCommand::new(args.shell, self.command.clone()).execute(ui)
            }
            Invocation::Template {
                template,
                values,
                target,
            } => {
                let request = Request {
                    template,
                    provided: values,
                    filename: target.filename,
                    context: target.context,
                };
                self.generate(request, target.kubeconfig, ui)
            }
            Invocation::Parent { parent } => {
                let template = self.with_registry_for(|registry| {
                    select_template(registry, &parent, ui).map(|t| t.name.clone())
                })?;
                let request = Request {
                    template,
                    ..Default::default()
                };
                self.generate(request, None, ui)
            }
        }
    }

    fn generate(
        &self,
        mut request: Request,
        kubeconfig: Option<std::path::PathBuf>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if request.context.is_none() {
            request.context = self.settings.context.clone();
        }
        let cluster = KubectlClient::new(kubeconfig.or_else(|| self.settings.kubeconfig.clone()));
        let writer = FileWriter;

        self.with_registry_for(|registry| {
            GenerateCommand::new(registry, request, &self.settings.output_dir)
                .with_cluster(&cluster)
                .with_writer(&writer)
                .execute(ui)
        })
    }
}
