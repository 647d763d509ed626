//! Lint for unrecognized module enablement tokens.

use iocman_config::{ConfigStore, keys};
use iocman_core::split_list;

use super::super::Lint;
use crate::{modules::ModuleKind, pipeline::Diagnostic};

/// Lint that errors on tokens in `IOC.module` that name no module.
pub struct ModuleTokenLint;

impl Lint for ModuleTokenLint {
    fn name(&self) -> &'static str {
        "module-token"
    }

    fn description(&self) -> &'static str {
        "Every token of IOC.module must name a supported module"
    }

    fn check(&self, config: &ConfigStore, diagnostics: &mut Vec<Diagnostic>) {
        let supported: Vec<&str> = ModuleKind::tokens().collect();
        for token in split_list(&config.get(keys::IOC, keys::ioc::MODULE)) {
            if ModuleKind::from_token(token).is_none() {
                diagnostics.push(
                    Diagnostic::error("validate", format!("module \"{token}\" is not supported"))
                        .at("IOC.module")
                        .hint(format!("supported modules: {}", supported.join(", "))),
                );
            }
        }
    }
}
