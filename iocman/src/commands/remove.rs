use clap::Args;
use eyre::Result;
use iocman_config::EnvironmentConfig;
use iocman_core::Confirm;
use iocman_project::RemoveMode;

use super::open_project;
use crate::prompt::TerminalConfirm;

#[derive(Args)]
pub struct RemoveCommand {
    /// Project name
    pub name: String,

    /// Remove the whole project and its snapshot, not only generated files
    #[arg(long)]
    pub all: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl RemoveCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);
        let (mode, prompt) = if self.all {
            (
                RemoveMode::All,
                format!("Remove project \"{}\" and its snapshot?", project.name()),
            )
        } else {
            (
                RemoveMode::Soft,
                format!("Remove the generated files of \"{}\"?", project.name()),
            )
        };

        if !self.yes && !TerminalConfirm.confirm(&prompt) {
            println!("Remove cancelled.");
            return Ok(());
        }

        project.remove(mode)?;
        match mode {
            RemoveMode::All => println!("✓ project \"{}\" removed", self.name),
            RemoveMode::Soft => {
                println!("✓ generated files of \"{}\" removed", project.name());
                println!("{}", project.status_hint());
            }
        }
        Ok(())
    }
}
