//! Show operation - configuration and health overview.

use iocman_config::keys;
use iocman_project::Project;

use crate::reports::ShowReport;

/// Collect what `iocman show` prints about a project.
pub fn show(project: &Project) -> ShowReport {
    ShowReport {
        name: project.name().to_string(),
        dir: project.paths().dir.clone(),
        status: project.ioc(keys::ioc::STATUS),
        snapshot: project.ioc(keys::ioc::SNAPSHOT),
        exported: project.ioc(keys::ioc::IS_EXPORTED) == "true",
        state: project.state().clone(),
        hint: project.status_hint(),
        config: project.config().to_string(),
    }
}
