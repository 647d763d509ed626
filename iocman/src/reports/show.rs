//! Show command report data structures.

use std::path::PathBuf;

use iocman_project::{ProjectState, StateLevel};

use super::output::{Output, Report};

/// Configuration and health of one project.
#[derive(Debug)]
pub struct ShowReport {
    pub name: String,
    pub dir: PathBuf,
    pub status: String,
    pub snapshot: String,
    pub exported: bool,
    pub state: ProjectState,
    /// What the operator should do next.
    pub hint: &'static str,
    /// Human readable configuration dump.
    pub config: String,
}

impl Report for ShowReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.name);
        out.key_value("Path", &self.dir.display().to_string());
        out.key_value("Status", &self.status);
        out.key_value("Snapshot", &self.snapshot);
        out.key_value("Exported", if self.exported { "yes" } else { "no" });
        out.key_value("State", self.state.level.as_str());
        if self.state.level != StateLevel::Normal {
            for line in self.state.info.lines() {
                out.list_item(line);
            }
        }
        out.newline();

        out.divider("config");
        out.preformatted(self.config.trim_end());
        out.newline();

        out.preformatted(self.hint);
    }
}
