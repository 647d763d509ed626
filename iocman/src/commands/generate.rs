use clap::Args;
use eyre::Result;
use iocman_codegen::GenerateOptions;
use iocman_config::EnvironmentConfig;
use iocman_core::{AlwaysYes, Confirm};

use super::open_project;
use crate::{
    prompt::TerminalConfirm,
    reports::{GenerateReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Project name
    pub name: String,

    /// Use the environment defaults for an empty IOC.bin or IOC.module
    #[arg(long)]
    pub force_default: bool,

    /// Answer yes to every question
    #[arg(short, long)]
    pub yes: bool,
}

impl GenerateCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);
        let confirm: &dyn Confirm = if self.yes { &AlwaysYes } else { &TerminalConfirm };

        let options = GenerateOptions {
            force_default: self.force_default,
        };
        let outcome = project.generate(options, confirm)?;

        let report = GenerateReport {
            project: project.name().to_string(),
            outcome,
        };
        report.render(&mut TerminalOutput);

        if report.outcome.is_blocked() {
            std::process::exit(1);
        }
        Ok(())
    }
}
