use clap::Args;
use eyre::{Result, bail};
use iocman_config::EnvironmentConfig;
use iocman_core::fs;
use iocman_project::Project;

#[derive(Args)]
pub struct CreateCommand {
    /// Project name, also the name of its directory in the repository
    pub name: String,
}

impl CreateCommand {
    pub fn run(&self, env: &EnvironmentConfig) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            bail!("invalid project name \"{}\"", self.name);
        }

        let dir = env.project_dir(name);
        fs::make_dirs(&dir)?;
        let project = Project::create(&dir, env)?;

        println!("✓ created project \"{}\" at {}", project.name(), dir.display());
        println!("{}", project.status_hint());
        Ok(())
    }
}
