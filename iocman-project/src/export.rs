//! Comparison with the exported copy mounted for the container host.

use std::path::{Path, PathBuf};

use eyre::Result;
use iocman_config::keys;
use iocman_core::fs::{self, DirDiff};
use serde::Serialize;

use crate::Project;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportCheck {
    /// Not exported, or no tracked snapshot to vouch for the export.
    NotExported,
    Checked(ExportReport),
}

/// Divergences between the project and `<mount_root>/<host>/<name>/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub mount_dir: PathBuf,
    /// Problems with the exported configuration file, if any.
    pub config_diff: Option<String>,
    /// One line per diverging file or directory, prefixed with its area.
    pub differences: Vec<String>,
}

impl ExportReport {
    pub fn is_consistent(&self) -> bool {
        self.config_diff.is_none() && self.differences.is_empty()
    }
}

impl Project {
    /// Compare the configuration file, `settings` and `startup` with the
    /// exported copy.
    pub fn check_export(&self) -> Result<ExportCheck> {
        if self.ioc(keys::ioc::IS_EXPORTED) != "true"
            || self.ioc(keys::ioc::SNAPSHOT) != keys::snapshot::TRACKED
        {
            return Ok(ExportCheck::NotExported);
        }

        let mount_dir = self.paths.mount_dir(&self.env, &self.ioc(keys::ioc::HOST));
        let exported_config = mount_dir.join(&self.env.config_file_name);
        let config_diff = if !exported_config.is_file() {
            Some("exported config file lost.".to_string())
        } else if !fs::files_equal(&self.paths.config_file, &exported_config)? {
            Some("exported config file changed.".to_string())
        } else {
            None
        };

        let mut differences = Vec::new();
        let areas = [("settings", &self.paths.settings), ("startup", &self.paths.startup)];
        for (area, local) in areas {
            compare_area(area, local, &mount_dir.join(area), &mut differences)?;
        }

        let report = ExportReport {
            mount_dir,
            config_diff,
            differences,
        };
        if !report.is_consistent() {
            tracing::warn!(project = %self.paths.name, "exported files diverge from the project");
        }
        Ok(ExportCheck::Checked(report))
    }
}

fn compare_area(area: &str, local: &Path, exported: &Path, out: &mut Vec<String>) -> Result<()> {
    match (local.is_dir(), exported.is_dir()) {
        (false, false) => {}
        (true, false) => out.push(format!("{area}: not exported.")),
        (false, true) => out.push(format!("{area}: missing in project.")),
        (true, true) => {
            let DirDiff {
                changed,
                left_only,
                right_only,
            } = fs::compare_dirs(local, exported)?;
            let lines = [
                ("changed", changed),
                ("not exported", left_only),
                ("only in export", right_only),
            ];
            for (label, paths) in lines {
                for path in paths {
                    out.push(format!("{area}/{}: {label}.", path.display()));
                }
            }
        }
    }
    Ok(())
}
