//! Lint for environment definitions in `SETTING.epics_env`.

use iocman_config::{ConfigStore, keys};
use iocman_core::{parse_condition, split_lines};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on `SETTING.epics_env` lines not of the form `NAME=value`.
pub struct EpicsEnvLint;

impl Lint for EpicsEnvLint {
    fn name(&self) -> &'static str {
        "epics-env"
    }

    fn description(&self) -> &'static str {
        "Every SETTING.epics_env line must be NAME=value"
    }

    fn check(&self, config: &ConfigStore, diagnostics: &mut Vec<Diagnostic>) {
        let value = config.get(keys::SETTING, keys::setting::EPICS_ENV);
        for line in split_lines(&value) {
            if parse_condition(line).is_none() {
                diagnostics.push(
                    Diagnostic::error("validate", format!("bad environment \"{line}\""))
                        .at("SETTING.epics_env")
                        .hint("define one NAME=value per line"),
                );
            }
        }
    }
}
