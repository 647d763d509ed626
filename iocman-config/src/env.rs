use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Optional file overriding the environment defaults, looked up in the
/// repository root.
pub const ENVIRONMENT_FILE: &str = "iocman.toml";

/// Fixed roots, container paths and defaults shared by every project.
///
/// Built once at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Directory holding one sub-directory per project.
    pub repository_root: PathBuf,
    /// Snapshot area, one sub-directory per project.
    pub snapshot_root: PathBuf,
    /// Shared support files (access-control template, status databases).
    pub template_root: PathBuf,
    /// Exported copies, laid out as `<mount_root>/<host>/<name>`.
    pub mount_root: PathBuf,
    /// Where IOC executables are installed inside the container.
    pub container_ioc_path: String,
    /// Where project runtime files are mounted inside the container.
    pub container_run_path: String,
    /// Log directory below `container_run_path`.
    pub log_dir: String,
    pub config_file_name: String,
    /// Executable used when `IOC.bin` is empty.
    pub default_ioc: String,
    /// Enablement list used when `IOC.module` is empty.
    pub default_modules: String,
    pub db_suffix: String,
    pub proto_suffix: String,
    pub other_suffixes: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            repository_root: PathBuf::from("ioc-repository"),
            snapshot_root: PathBuf::from("ioc-snapshot"),
            template_root: PathBuf::from("templates"),
            mount_root: PathBuf::from("ioc-for-docker"),
            container_ioc_path: "/opt/EPICS/IOC".to_string(),
            container_run_path: "/opt/EPICS/RUN".to_string(),
            log_dir: "iocLog".to_string(),
            config_file_name: "ioc.toml".to_string(),
            default_ioc: "ST-IOC".to_string(),
            default_modules: "autosave, caputlog".to_string(),
            db_suffix: ".db".to_string(),
            proto_suffix: ".proto".to_string(),
            other_suffixes: vec![".im".to_string(), ".txt".to_string()],
        }
    }
}

impl EnvironmentConfig {
    /// Defaults with every relative root resolved against `root`.
    pub fn under_root(root: impl AsRef<Path>) -> Self {
        Self::default().resolved(root.as_ref())
    }

    /// Defaults under `root`, overridden by `<root>/iocman.toml` if present.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(ENVIRONMENT_FILE);
        if !path.is_file() {
            return Ok(Self::under_root(root));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let env: Self = toml::from_str(&content).map_err(|source| {
            Box::new(Error::Environment {
                path: path.clone(),
                source,
            })
        })?;
        tracing::debug!(path = %path.display(), "loaded environment overrides");
        Ok(env.resolved(root))
    }

    fn resolved(mut self, root: &Path) -> Self {
        for dir in [
            &mut self.repository_root,
            &mut self.snapshot_root,
            &mut self.template_root,
            &mut self.mount_root,
        ] {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
        self
    }

    /// Directory of the project called `name` inside the repository.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.repository_root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_under_root_resolves_relative_roots() {
        let env = EnvironmentConfig::under_root("/srv/iocman");

        assert_eq!(env.repository_root, PathBuf::from("/srv/iocman/ioc-repository"));
        assert_eq!(env.snapshot_root, PathBuf::from("/srv/iocman/ioc-snapshot"));
        assert_eq!(env.template_root, PathBuf::from("/srv/iocman/templates"));
        assert_eq!(env.default_ioc, "ST-IOC");
        assert_eq!(env.project_dir("demo"), PathBuf::from("/srv/iocman/ioc-repository/demo"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let env = EnvironmentConfig::load(temp.path()).unwrap();
        assert_eq!(env, EnvironmentConfig::under_root(temp.path()));
    }

    #[test]
    fn test_load_overrides_selected_fields() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(ENVIRONMENT_FILE),
            "snapshot_root = \"/var/lib/snapshots\"\n\
             default_ioc = \"MY-IOC\"\n\
             other_suffixes = [\".im\"]\n",
        )
        .unwrap();

        let env = EnvironmentConfig::load(temp.path()).unwrap();

        assert_eq!(env.snapshot_root, PathBuf::from("/var/lib/snapshots"));
        assert_eq!(env.repository_root, temp.path().join("ioc-repository"));
        assert_eq!(env.default_ioc, "MY-IOC");
        assert_eq!(env.other_suffixes, vec![".im".to_string()]);
        assert_eq!(env.container_ioc_path, "/opt/EPICS/IOC");
    }

    #[test]
    fn test_load_rejects_bad_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(ENVIRONMENT_FILE), "default_ioc = [").unwrap();

        let err = EnvironmentConfig::load(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::Environment { .. }));
    }
}
