//! Check command report data structures.

use std::path::PathBuf;

use iocman_codegen::{Diagnostic, Severity};
use iocman_project::{ExportCheck, ProjectState, SnapshotCheck, StateLevel};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from validating a project and comparing it with its
/// snapshot and export.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub project: String,
    /// Path to the config file.
    pub config_path: PathBuf,
    pub state: ProjectState,
    /// Findings of the validation lints.
    pub diagnostics: Vec<Diagnostic>,
    pub snapshot: SnapshotCheck,
    pub export: ExportCheck,
}

impl CheckReport {
    /// Whether the settings would generate (no blocking diagnostics).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

/// Print one diagnostic with its location and hint.
pub(super) fn render_diagnostic(diagnostic: &Diagnostic, out: &mut dyn Output) {
    let mut msg = diagnostic.message.clone();
    if let Some(location) = &diagnostic.location {
        msg.push_str(&format!("\n  --> {location}"));
    }
    if let Some(hint) = &diagnostic.hint {
        msg.push_str(&format!("\n  = help: {hint}"));
    }

    match diagnostic.severity {
        Severity::Error => out.error(&msg),
        Severity::Warning => out.warning(&msg),
        Severity::Info => out.preformatted(&format!("info: {msg}")),
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            render_diagnostic(diagnostic, out);
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        }

        out.key_value("state", self.state.level.as_str());
        if self.state.level != StateLevel::Normal {
            for line in self.state.info.lines() {
                out.list_item(line);
            }
        }

        match &self.snapshot {
            SnapshotCheck::NotTracked => out.key_value("snapshot", "not tracked"),
            SnapshotCheck::Checked(report) if report.consistent => {
                out.key_value("snapshot", "consistent")
            }
            SnapshotCheck::Checked(report) => {
                out.section("snapshot differences");
                for line in report.summary().lines() {
                    out.list_item(line);
                }
            }
        }

        match &self.export {
            ExportCheck::NotExported => out.key_value("export", "not exported"),
            ExportCheck::Checked(report) if report.is_consistent() => out.key_value(
                "export",
                &format!("consistent with {}", report.mount_dir.display()),
            ),
            ExportCheck::Checked(report) => {
                out.section(&format!("export differences ({})", report.mount_dir.display()));
                for line in report.config_diff.iter().chain(&report.differences) {
                    out.list_item(line);
                }
            }
        }
    }
}
