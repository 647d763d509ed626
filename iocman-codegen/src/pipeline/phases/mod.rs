//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the configuration
//! - [`ResolvePhase`] - fills in executable and module defaults
//! - [`ContributePhase`] - boilerplate plus every enabled module
//! - [`SubstitutePhase`] - expands `DB.load` into the substitutions file
//! - [`EmitPhase`] - executes file actions and writes the artifacts

mod contribute;
mod emit;
mod resolve;
mod substitute;
mod validate;

pub use contribute::ContributePhase;
pub use emit::EmitPhase;
pub use resolve::ResolvePhase;
pub use substitute::SubstitutePhase;
pub use validate::{EpicsEnvLint, Lint, LintInfo, ModuleTokenLint, ValidatePhase};
