use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use iocman_config::EnvironmentConfig;

use super::open_project;
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct ImportCommand {
    /// Project name
    pub name: String,

    /// Directory whose top-level files are imported
    pub dir: PathBuf,
}

impl ImportCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);

        let report = project.sources().import(&self.dir)?;
        report.render(&mut TerminalOutput);

        Ok(())
    }
}
