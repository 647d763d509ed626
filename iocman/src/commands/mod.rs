mod check;
mod completions;
mod create;
mod generate;
mod import;
mod remove;
mod set;
mod show;
mod snapshot;
mod template;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use create::CreateCommand;
use eyre::Result;
use generate::GenerateCommand;
use import::ImportCommand;
use iocman_config::EnvironmentConfig;
use iocman_project::Project;
use remove::RemoveCommand;
use set::SetCommand;
use show::ShowCommand;
use snapshot::SnapshotCommand;
use template::TemplateCommand;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for iocman_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with_config_error(*e),
        }
    }
}

impl<T> UnwrapOrExit<T> for Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(report) => match report.downcast::<Box<iocman_config::Error>>() {
                Ok(e) => exit_with_config_error(*e),
                Err(report) => {
                    eprintln!("Error: {report:?}");
                    std::process::exit(1);
                }
            },
        }
    }
}

fn exit_with_config_error(e: iocman_config::Error) -> ! {
    eprintln!("{:?}", miette::Report::new(e));
    std::process::exit(1);
}

/// Open the project called `name` inside the repository.
pub(crate) fn open_project(env: &EnvironmentConfig, name: &str) -> Project {
    Project::open(env.project_dir(name), env).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "iocman")]
#[command(version)]
#[command(about = "Manage IOC projects and generate their startup files")]
pub(crate) struct Cli {
    /// Root directory holding the repository, snapshot and template areas
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        if let Commands::Completions(cmd) = &self.command {
            return cmd.run();
        }

        let env = EnvironmentConfig::load(&self.root).unwrap_or_exit();
        tracing::debug!(repository = %env.repository_root.display(), "environment loaded");

        match &self.command {
            Commands::Create(cmd) => cmd.run(&env),
            Commands::Set(cmd) => cmd.run(&env),
            Commands::Show(cmd) => cmd.run(&env),
            Commands::Import(cmd) => cmd.run(&env),
            Commands::Template(cmd) => cmd.run(&env),
            Commands::Check(cmd) => cmd.run(&env),
            Commands::Generate(cmd) => cmd.run(&env),
            Commands::Snapshot(cmd) => cmd.run(&env),
            Commands::Remove(cmd) => cmd.run(&env),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project in the repository
    Create(CreateCommand),

    /// Set one configuration option
    Set(SetCommand),

    /// Show the configuration and state of a project
    Show(ShowCommand),

    /// Import source files (.db, .proto, ...) from a directory
    Import(ImportCommand),

    /// Add an editable template section (asyn, stream or raw)
    Template(TemplateCommand),

    /// Validate settings and compare with the snapshot and export
    Check(CheckCommand),

    /// Generate the substitutions file and startup script
    Generate(GenerateCommand),

    /// Restore or discard the project snapshot
    Snapshot(SnapshotCommand),

    /// Remove generated files, or the whole project
    Remove(RemoveCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
