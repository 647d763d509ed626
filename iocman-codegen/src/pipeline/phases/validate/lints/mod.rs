//! Built-in lints for configuration validation.

mod epics_env;
mod module_token;

pub use epics_env::EpicsEnvLint;
pub use module_token::ModuleTokenLint;
