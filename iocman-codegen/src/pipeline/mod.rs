//! Generation pipeline for startup files.
//!
//! This module provides a [`Pipeline`] orchestrator that turns a project
//! configuration into its generated artifacts. The pipeline provides:
//!
//! - Explicit phase boundaries (validate → resolve → contribute → substitute → emit)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`GenerationContext`]
//!
//! Every phase before `emit` only records lines, file actions and
//! diagnostics. A blocking diagnostic stops the run before anything is
//! written.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::{FileAction, GenerateOptions, GenerationContext};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::{Plugin, TracingPlugin};
pub use runner::Pipeline;
