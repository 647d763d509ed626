use clap::Args;
use eyre::Result;
use iocman_config::EnvironmentConfig;

use super::open_project;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ShowCommand {
    /// Project name
    pub name: String,
}

impl ShowCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let project = open_project(env, &self.name);

        let report = ops::show(&project);
        report.render(&mut TerminalOutput);

        Ok(())
    }
}
