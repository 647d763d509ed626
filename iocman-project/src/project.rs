use std::path::Path;

use eyre::{Result, WrapErr, bail};
use iocman_codegen::Severity;
use iocman_config::{ConfigStore, EnvironmentConfig, ProjectPaths, keys};
use iocman_core::{fs, normalize_value};

use crate::{
    ProjectState,
    snapshot::{SnapshotCheck, SnapshotManager},
    sources::SourceFileRegistry,
};

/// How much of a project [`Project::remove`] deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    /// Generated runtime files only. The project stays usable.
    Soft,
    /// The snapshot and the whole project directory.
    All,
}

/// An IOC project directory and its configuration.
///
/// Every mutating method persists the configuration before returning.
#[derive(Debug)]
pub struct Project {
    pub(crate) env: EnvironmentConfig,
    pub(crate) paths: ProjectPaths,
    pub(crate) config: ConfigStore,
    pub(crate) state: ProjectState,
}

impl Project {
    /// Open an existing project.
    ///
    /// Normalizes the configuration, repairs a stale `IOC.name`, rescans
    /// the source directory and checks the snapshot.
    pub fn open(dir: impl AsRef<Path>, env: &EnvironmentConfig) -> Result<Self> {
        let mut project = Self::load(dir.as_ref(), env)?;
        project.self_heal_name()?;

        if let Err(e) = project.sources().rescan() {
            tracing::warn!(project = %project.name(), "source scan failed: {e:#}");
        }

        match project.snapshot().check()? {
            SnapshotCheck::Checked(report) if !report.consistent => {
                tracing::warn!(project = %project.name(), "{}", report.summary());
            }
            _ => {}
        }
        tracing::debug!(project = %project.name(), "project opened");
        Ok(project)
    }

    /// Create a new project in the existing directory `dir`.
    ///
    /// Builds the directory skeleton and writes the default
    /// configuration. Fails if a configuration already exists.
    pub fn create(dir: impl AsRef<Path>, env: &EnvironmentConfig) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!("invalid project directory '{}'", dir.display());
        }
        let paths = ProjectPaths::derive(env, dir);
        if paths.config_file.exists() {
            bail!("project already exists at '{}'", dir.display());
        }

        for path in paths.skeleton() {
            fs::make_dirs(path)?;
        }

        let mut config = ConfigStore::new(&paths.config_file);
        config.update(|config| write_defaults(config, &paths.name))?;
        tracing::info!(project = %paths.name, "project created");

        Ok(Self {
            env: env.clone(),
            state: ProjectState::from_store(&config),
            paths,
            config,
        })
    }

    fn load(dir: &Path, env: &EnvironmentConfig) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Box::new(iocman_config::Error::InvalidProject {
                path: dir.to_path_buf(),
            })
            .into());
        }
        let paths = ProjectPaths::derive(env, dir);
        let mut config = ConfigStore::load(&paths.config_file)?;
        config.normalize()?;

        Ok(Self {
            env: env.clone(),
            state: ProjectState::from_store(&config),
            paths,
            config,
        })
    }

    /// The directory name is authoritative; rewrite a diverging `IOC.name`.
    fn self_heal_name(&mut self) -> Result<()> {
        let stored = self.config.get(keys::IOC, keys::ioc::NAME);
        if stored == self.paths.name {
            return Ok(());
        }
        let name = self.paths.name.clone();
        self.config
            .update(|config| config.set(keys::IOC, keys::ioc::NAME, name.as_str()))?;
        tracing::warn!(
            old = %stored,
            new = %name,
            "project directory was renamed, IOC.name updated to follow it"
        );
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.paths.name
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn env(&self) -> &EnvironmentConfig {
        &self.env
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    /// Value of `IOC.<option>`.
    pub fn ioc(&self, option: &str) -> String {
        self.config.get(keys::IOC, option)
    }

    pub fn sources(&mut self) -> SourceFileRegistry<'_> {
        SourceFileRegistry::new(self)
    }

    pub fn snapshot(&mut self) -> SnapshotManager<'_> {
        SnapshotManager::new(self)
    }

    /// Record a diagnostic in the project state and persist it.
    pub fn escalate(
        &mut self,
        severity: Severity,
        message: &str,
        hint: Option<&str>,
    ) -> Result<()> {
        if !self.state.escalate(severity, message, hint) {
            return Ok(());
        }
        match severity {
            Severity::Error => tracing::error!(project = %self.paths.name, "{message}"),
            _ => tracing::warn!(project = %self.paths.name, "{message}"),
        }
        let state = self.state.clone();
        self.config.update(|config| state.write_to(config))?;
        Ok(())
    }

    /// Set one option from operator input. The value is normalized.
    pub fn set_option(&mut self, section: &str, option: &str, value: &str) -> Result<()> {
        if section.trim().is_empty() || option.trim().is_empty() {
            bail!("section and option names must not be empty");
        }
        if section.eq_ignore_ascii_case(keys::IOC) && option.eq_ignore_ascii_case(keys::ioc::NAME) {
            bail!("IOC.name follows the project directory, rename the directory instead");
        }
        let value = normalize_value(value);
        self.config
            .update(|config| config.set(section.trim(), option.trim(), value))?;
        Ok(())
    }

    /// Set `IOC.status`.
    pub(crate) fn set_status(&mut self, status: &str) -> Result<()> {
        self.config
            .update(|config| config.set(keys::IOC, keys::ioc::STATUS, status))?;
        Ok(())
    }

    /// Delete generated files, or the whole project.
    ///
    /// After [`RemoveMode::All`] the project no longer exists on disk and
    /// must not be used further.
    pub fn remove(&mut self, mode: RemoveMode) -> Result<()> {
        match mode {
            RemoveMode::Soft => {
                for dir in [&self.paths.startup, &self.paths.settings, &self.paths.log] {
                    fs::remove_dir_if_exists(dir)?;
                }
                self.set_status(keys::status::REMOVED)?;
                self.snapshot().check()?;
                tracing::info!(project = %self.paths.name, "generated files removed");
            }
            RemoveMode::All => {
                self.snapshot().discard()?;
                fs::remove_dir_if_exists(&self.paths.dir)
                    .wrap_err_with(|| format!("failed to remove project '{}'", self.paths.name))?;
                tracing::info!(project = %self.paths.name, "project removed");
            }
        }
        Ok(())
    }

    /// Operator advice derived from status, snapshot and export flags.
    pub fn status_hint(&self) -> &'static str {
        let status = self.ioc(keys::ioc::STATUS);
        let snapshot = self.ioc(keys::ioc::SNAPSHOT);

        if snapshot == keys::snapshot::ERROR {
            return "Snapshot is broken. Generate startup files again to take a new snapshot.";
        }
        match status.as_str() {
            keys::status::CREATED => {
                "Project just created. Make settings, then generate startup files and export them."
            }
            keys::status::GENERATED if self.ioc(keys::ioc::IS_EXPORTED) == "true" => {
                "Startup files generated and exported."
            }
            keys::status::GENERATED => "Startup files generated, they can be exported now.",
            keys::status::RESTORED => {
                "Project just restored. Check the settings, then generate startup files again."
            }
            keys::status::REMOVED => {
                "Generated files were removed. Generate startup files again to restore them."
            }
            _ => "Unknown project status.",
        }
    }
}

/// Reserved keys of a new project.
fn write_defaults(config: &mut ConfigStore, name: &str) {
    use keys::{ioc, setting, src};

    for (option, value) in [
        (ioc::NAME, name),
        (ioc::HOST, ""),
        (ioc::IMAGE, ""),
        (ioc::BIN, ""),
        (ioc::MODULE, "autosave, caputlog"),
        (ioc::DESCRIPTION, ""),
        (ioc::STATE, keys::state::NORMAL),
        (ioc::STATE_INFO, ""),
        (ioc::STATUS, keys::status::CREATED),
        (ioc::SNAPSHOT, keys::snapshot::UNTRACKED),
        (ioc::IS_EXPORTED, "false"),
    ] {
        config.set(keys::IOC, option, value);
    }
    for option in [src::DB_FILE, src::PROTOCOL_FILE, src::OTHER_FILE] {
        config.set(keys::SRC, option, "");
    }
    config.set(keys::DB, keys::db::LOAD, "");
    config.set(keys::SETTING, setting::REPORT_INFO, "true");
    config.set(keys::SETTING, setting::CAPUTLOG_JSON, "false");
    config.set(keys::SETTING, setting::EPICS_ENV, "");
}
