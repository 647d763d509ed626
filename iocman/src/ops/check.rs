//! Check operation - validation, snapshot and export consistency.

use eyre::{Context, Result};
use iocman_project::Project;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the validation lints without writing anything, then compares the
/// project with its snapshot and its exported copy.
pub fn check(project: &mut Project) -> Result<CheckReport> {
    let diagnostics = project.validate();
    let snapshot = project
        .snapshot()
        .check()
        .wrap_err("Snapshot check failed")?;
    let export = project.check_export().wrap_err("Export check failed")?;

    Ok(CheckReport {
        project: project.name().to_string(),
        config_path: project.paths().config_file.clone(),
        state: project.state().clone(),
        diagnostics,
        snapshot,
        export,
    })
}
