//! IOC project lifecycle.
//!
//! A [`Project`] is a directory holding an `ioc.toml` configuration, the
//! managed source files under `src/` and the generated runtime area under
//! `project/`. This crate opens and creates projects, imports sources,
//! drives generation and keeps the snapshot used to detect drift.
//!
//! ```no_run
//! use iocman_codegen::GenerateOptions;
//! use iocman_config::EnvironmentConfig;
//! use iocman_core::AlwaysYes;
//! use iocman_project::Project;
//!
//! # fn main() -> eyre::Result<()> {
//! let env = EnvironmentConfig::load("/srv/iocman")?;
//! let mut project = Project::open(env.project_dir("demo"), &env)?;
//! let outcome = project.generate(GenerateOptions::default(), &AlwaysYes)?;
//! assert!(!outcome.is_blocked());
//! # Ok(())
//! # }
//! ```

mod export;
mod generate;
mod project;
mod snapshot;
mod sources;
mod state;
mod templates;

pub use export::{ExportCheck, ExportReport};
pub use generate::GenerationOutcome;
pub use project::{Project, RemoveMode};
pub use snapshot::{RestoreOutcome, SnapshotCheck, SnapshotManager, SnapshotReport};
pub use sources::{ImportReport, SourceFileRegistry};
pub use state::{ProjectState, StateLevel};
pub use templates::TemplateKind;
