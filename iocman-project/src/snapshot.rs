//! Snapshot of the configuration and sources taken at generation time.

use std::path::PathBuf;

use eyre::{Result, WrapErr, bail};
use iocman_codegen::Severity;
use iocman_config::{ConfigStore, keys};
use iocman_core::{Confirm, FileMode, fs};
use serde::Serialize;

use crate::{Project, ProjectState};

/// Result of comparing the live project against its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotCheck {
    /// The project has no usable snapshot to compare with.
    NotTracked,
    Checked(SnapshotReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    pub consistent: bool,
    pub config_diff: String,
    pub source_diff: String,
}

impl SnapshotReport {
    /// Both diffs on one line each, or a note that nothing changed.
    pub fn summary(&self) -> String {
        if self.consistent {
            return "files are consistent with the snapshot".to_string();
        }
        [self.config_diff.as_str(), self.source_diff.as_str()]
            .into_iter()
            .filter(|diff| !diff.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Outcome of [`SnapshotManager::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(SnapshotCheck),
    /// The operator declined.
    Declined,
}

/// Captures and compares the project snapshot.
///
/// The snapshot lives outside the project, in
/// `<snapshot_root>/<name>/`, and holds a copy of the configuration file
/// plus a mirror of `src/`.
pub struct SnapshotManager<'p> {
    project: &'p mut Project,
}

impl<'p> SnapshotManager<'p> {
    pub(crate) fn new(project: &'p mut Project) -> Self {
        Self { project }
    }

    fn record(&self) -> String {
        self.project.ioc(keys::ioc::SNAPSHOT)
    }

    fn set_record(&mut self, value: &str) -> Result<()> {
        self.project
            .config
            .update(|config| config.set(keys::IOC, keys::ioc::SNAPSHOT, value))?;
        Ok(())
    }

    /// Replace the snapshot with the current configuration and sources.
    ///
    /// The record is marked tracked before copying so the captured
    /// configuration matches the live one. Any copy failure leaves the
    /// record in `error`.
    pub fn capture(&mut self) -> Result<()> {
        self.set_record(keys::snapshot::TRACKED)?;

        let paths = &self.project.paths;
        let copied = fs::remove_dir_if_exists(&paths.snapshot)
            .and_then(|_| {
                fs::copy_file(&paths.config_file, &paths.snapshot_config, FileMode::ReadOnly)
            })
            .and_then(|_| fs::mirror_dir(&paths.src, &paths.snapshot_src, FileMode::ReadOnly));

        if let Err(e) = copied {
            self.set_record(keys::snapshot::ERROR)?;
            return Err(e.wrap_err(format!(
                "failed to take snapshot of project '{}'",
                self.project.paths.name
            )));
        }
        tracing::info!(
            project = %self.project.paths.name,
            path = %self.project.paths.snapshot.display(),
            "snapshot taken"
        );
        Ok(())
    }

    /// Compare the live configuration file and sources with the snapshot.
    ///
    /// A missing snapshot artifact moves the record to `error`; a missing
    /// live source directory moves the project state to `error`.
    pub fn check(&mut self) -> Result<SnapshotCheck> {
        if self.record() != keys::snapshot::TRACKED {
            tracing::debug!(
                project = %self.project.paths.name,
                "snapshot not tracked, nothing to check"
            );
            return Ok(SnapshotCheck::NotTracked);
        }

        let paths = self.project.paths.clone();
        let mut report = SnapshotReport {
            consistent: true,
            ..Default::default()
        };
        let mut snapshot_lost = false;

        if !paths.snapshot_config.is_file() {
            report.config_diff = "config file snapshot lost.".to_string();
            snapshot_lost = true;
        } else if !paths.config_file.is_file() {
            report.config_diff = "config file lost.".to_string();
        } else if !fs::files_equal(&paths.snapshot_config, &paths.config_file)? {
            report.config_diff = "config file changed.".to_string();
        }

        if !paths.snapshot_src.is_dir() {
            report.source_diff = "source directory snapshot lost.".to_string();
            snapshot_lost = true;
        } else if !paths.src.is_dir() {
            report.source_diff = "source directory lost.".to_string();
            self.project.escalate(
                Severity::Error,
                "source directory lost.",
                Some("restore the src directory of the project"),
            )?;
        } else {
            let diff = fs::compare_dirs(&paths.snapshot_src, &paths.src)?;
            report.source_diff = [
                ("changed files", &diff.changed),
                ("missing files and directories", &diff.left_only),
                ("untracked files and directories", &diff.right_only),
            ]
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(label, items)| format!("{label}: {}.", join_paths(items)))
            .collect::<Vec<_>>()
            .join("\n");
        }

        report.consistent = report.config_diff.is_empty() && report.source_diff.is_empty();
        if snapshot_lost {
            self.set_record(keys::snapshot::ERROR)?;
        }
        Ok(SnapshotCheck::Checked(report))
    }

    /// Delete the snapshot area and stop tracking.
    pub fn discard(&mut self) -> Result<()> {
        let removed = fs::remove_dir_if_exists(&self.project.paths.snapshot)?;
        if !removed {
            tracing::info!(
                path = %self.project.paths.snapshot.display(),
                "no snapshot to discard"
            );
        }
        self.set_record(keys::snapshot::UNTRACKED)
    }

    /// Replace the live configuration with the snapshot's.
    ///
    /// Refused while the record is `error`. Asks `confirm` unless `force`.
    pub fn restore(&mut self, force: bool, confirm: &dyn Confirm) -> Result<RestoreOutcome> {
        let name = self.project.paths.name.clone();
        if self.record() == keys::snapshot::ERROR {
            bail!("can't restore project '{name}' while its snapshot is in \"error\" state");
        }
        let snapshot_config = self.project.paths.snapshot_config.clone();
        if !snapshot_config.is_file() {
            bail!("snapshot file '{}' not found", snapshot_config.display());
        }
        let snapshot = ConfigStore::load(&snapshot_config)
            .wrap_err_with(|| format!("invalid snapshot file '{}'", snapshot_config.display()))?;

        let prompt = format!("Restore the settings of \"{name}\" from its snapshot?");
        if !force && !confirm.confirm(&prompt) {
            tracing::info!(project = %name, "restore declined");
            return Ok(RestoreOutcome::Declined);
        }

        self.project.config.update(|config| {
            config.replace_contents(snapshot);
            config.set(keys::IOC, keys::ioc::STATUS, keys::status::RESTORED);
        })?;
        self.project.state = ProjectState::from_store(&self.project.config);
        tracing::info!(project = %name, "settings restored from snapshot");

        Ok(RestoreOutcome::Restored(self.check()?))
    }

    /// Location of the snapshot area.
    pub fn path(&self) -> PathBuf {
        self.project.paths.snapshot.clone()
    }
}

fn join_paths(items: &[PathBuf]) -> String {
    items
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
