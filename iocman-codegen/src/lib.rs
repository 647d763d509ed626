//! Startup file generation for IOC projects.
//!
//! Turns a project configuration into an `st.cmd` startup script and a
//! `<name>.substitutions` file, copying the databases, protocol files and
//! support files they reference into the project runtime area.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phased generation ([`Pipeline`], [`GenerationContext`], diagnostics)
//! - [`modules`] - Feature modules contributing to the startup script
//! - [`directive`] - Parsers for `DB.load` and `RAW.file_copy` lines
//! - [`builder`] - Line buffers for the three script phases
//! - [`files`] - The generated artifacts

pub mod builder;
pub mod directive;
pub mod files;
pub mod modules;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use modules::ModuleKind;
pub use pipeline::{
    Diagnostic, GenerateOptions, GenerationContext, Pipeline, Plugin, Severity, TracingPlugin,
};
