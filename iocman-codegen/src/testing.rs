//! Scratch project layout for generator tests.

use std::fs;

use iocman_config::{ConfigStore, EnvironmentConfig, ProjectPaths, SourceListing, keys};
use iocman_core::AlwaysNo;
use tempfile::TempDir;

use crate::pipeline::GenerationContext;

/// Template files every fixture provides.
pub const TEMPLATES: [&str; 4] = [
    "template.acf",
    "db/status_ioc.db",
    "db/status_OS.db",
    "db/asynRecord.db",
];

/// A project called `demo` inside a temporary environment root.
pub struct Fixture {
    pub env: EnvironmentConfig,
    pub paths: ProjectPaths,
    _temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let env = EnvironmentConfig::under_root(temp.path());
        let paths = ProjectPaths::derive(&env, &env.project_dir("demo"));

        for template in TEMPLATES {
            let path = env.template_root.join(template);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("# {template}\n")).unwrap();
        }
        fs::create_dir_all(&paths.src).unwrap();

        Self {
            env,
            paths,
            _temp: temp,
        }
    }

    /// Add a file to the managed source directory.
    pub fn source(&self, name: &str, content: &str) -> &Self {
        fs::write(self.paths.src.join(name), content).unwrap();
        self
    }

    /// Configuration with `bin` and `module` set.
    pub fn config(&self, module: &str) -> ConfigStore {
        let mut config = ConfigStore::new(&self.paths.config_file);
        config.set(keys::IOC, keys::ioc::NAME, "demo");
        config.set(keys::IOC, keys::ioc::BIN, "ST-IOC");
        config.set(keys::IOC, keys::ioc::MODULE, module);
        config
    }

    pub fn context(&self, config: ConfigStore) -> GenerationContext<'_> {
        let names = iocman_core::fs::list_files(&self.paths.src).unwrap();
        let sources = SourceListing::classify(&self.env, &names);
        GenerationContext::new(config, &self.env, &self.paths, sources, &AlwaysNo)
    }
}
