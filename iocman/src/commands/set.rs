use clap::Args;
use eyre::Result;
use iocman_config::EnvironmentConfig;

use super::open_project;

#[derive(Args)]
pub struct SetCommand {
    /// Project name
    pub name: String,

    /// Section, e.g. IOC, DB or SETTING
    pub section: String,

    /// Option inside the section
    pub option: String,

    /// New value. Multi-line values are one directive per line
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

impl SetCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);
        project.set_option(&self.section, &self.option, &self.value)?;

        let (section, option) = (self.section.trim(), self.option.trim());
        println!(
            "✓ {}.{} = {:?}",
            section.to_uppercase(),
            option.to_lowercase(),
            project.config().get(section, option)
        );
        Ok(())
    }
}
