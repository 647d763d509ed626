//! Project configuration for iocman.
//!
//! Holds the section-organized [`ConfigStore`] backing every project, the
//! reserved section and option names, the immutable
//! [`EnvironmentConfig`] and the paths derived from it.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod env;
mod error;
pub mod keys;
mod paths;
mod source;
mod store;

pub use env::{ENVIRONMENT_FILE, EnvironmentConfig};
pub use error::{Error, Result};
pub use paths::ProjectPaths;
pub use source::{SourceKind, SourceListing};
pub use store::ConfigStore;
