use clap::Args;
use eyre::{Context, Result};
use iocman_config::EnvironmentConfig;

use super::open_project;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Project name
    pub name: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);

        let report = ops::check(&mut project)?;
        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput);
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
