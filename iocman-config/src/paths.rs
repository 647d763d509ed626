use std::path::{Path, PathBuf};

use crate::EnvironmentConfig;

/// Every location a project touches, derived once from its directory.
///
/// Host paths are absolute when the project directory is. Container paths
/// are plain strings since they are only ever written into generated
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project name, the final component of `dir`.
    pub name: String,
    pub dir: PathBuf,
    /// Managed source files.
    pub src: PathBuf,
    pub config_file: PathBuf,
    /// Generated runtime area.
    pub runtime: PathBuf,
    pub settings: PathBuf,
    pub log: PathBuf,
    pub startup: PathBuf,
    pub db: PathBuf,
    pub boot: PathBuf,
    pub snapshot: PathBuf,
    pub snapshot_config: PathBuf,
    pub snapshot_src: PathBuf,
    pub template: PathBuf,
    pub container_settings: String,
    pub container_log: String,
    pub container_startup: String,
}

impl ProjectPaths {
    pub fn derive(env: &EnvironmentConfig, dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let runtime = dir.join("project");
        let startup = runtime.join("startup");
        let snapshot = env.snapshot_root.join(&name);
        let container_root = format!("{}/{}", env.container_run_path.trim_end_matches('/'), name);

        Self {
            dir: dir.to_path_buf(),
            src: dir.join("src"),
            config_file: dir.join(&env.config_file_name),
            settings: runtime.join("settings"),
            log: runtime.join("log"),
            db: startup.join("db"),
            boot: startup.join("iocBoot"),
            snapshot_config: snapshot.join(&env.config_file_name),
            snapshot_src: snapshot.join("src"),
            template: env.template_root.clone(),
            container_settings: format!("{container_root}/settings"),
            container_log: format!("{container_root}/log"),
            container_startup: format!("{container_root}/startup"),
            name,
            runtime,
            startup,
            snapshot,
        }
    }

    /// Exported copy of the project for `host`.
    pub fn mount_dir(&self, env: &EnvironmentConfig, host: &str) -> PathBuf {
        env.mount_root.join(host).join(&self.name)
    }

    /// Generated startup script.
    pub fn startup_script(&self) -> PathBuf {
        self.boot.join("st.cmd")
    }

    /// Generated substitution file.
    pub fn substitutions(&self) -> PathBuf {
        self.db.join(format!("{}.substitutions", self.name))
    }

    /// Directories created for a new project.
    pub fn skeleton(&self) -> [&Path; 5] {
        [&self.src, &self.settings, &self.log, &self.db, &self.boot]
    }
}
