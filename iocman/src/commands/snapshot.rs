use clap::{Args, Subcommand};
use eyre::Result;
use iocman_config::EnvironmentConfig;
use iocman_project::{RestoreOutcome, SnapshotCheck};

use super::open_project;
use crate::prompt::TerminalConfirm;

#[derive(Args)]
pub struct SnapshotCommand {
    #[command(subcommand)]
    action: SnapshotAction,
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Replace the current settings with the snapshot's
    Restore {
        /// Project name
        name: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete the snapshot and stop tracking the project
    Discard {
        /// Project name
        name: String,
    },
}

impl SnapshotCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        match &self.action {
            SnapshotAction::Restore { name, force } => {
                let mut project = open_project(env, name);
                match project.snapshot().restore(*force, &TerminalConfirm)? {
                    RestoreOutcome::Declined => println!("Restore cancelled."),
                    RestoreOutcome::Restored(check) => {
                        println!("✓ settings of \"{}\" restored from snapshot", project.name());
                        if let SnapshotCheck::Checked(report) = check {
                            println!("{}", report.summary());
                        }
                        println!("{}", project.status_hint());
                    }
                }
            }
            SnapshotAction::Discard { name } => {
                let mut project = open_project(env, name);
                let path = project.snapshot().path();
                project.snapshot().discard()?;
                println!("✓ snapshot {} discarded", path.display());
            }
        }
        Ok(())
    }
}
