use clap::Args;
use eyre::Result;
use iocman_config::EnvironmentConfig;
use iocman_project::TemplateKind;

use super::open_project;

#[derive(Args)]
pub struct TemplateCommand {
    /// Project name
    pub name: String,

    /// Section to add: asyn, stream or raw
    pub kind: String,
}

impl TemplateCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let mut project = open_project(env, &self.name);

        if self.kind.trim().eq_ignore_ascii_case("raw") {
            project.add_raw_template()?;
            println!("✓ added RAW section, edit it with 'iocman set'");
        } else {
            let kind: TemplateKind = self.kind.parse()?;
            project.add_module_template(kind)?;
            println!(
                "✓ added {} section, remember to enable \"{kind}\" in IOC.module",
                kind.section()
            );
        }
        Ok(())
    }
}
