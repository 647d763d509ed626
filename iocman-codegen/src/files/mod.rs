//! Artifacts written by the emit phase.

mod startup_script;
mod substitutions;

pub use startup_script::StartupScript;
pub use substitutions::SubstitutionsFile;

/// First line of generated files that accept `#` comments.
pub const GENERATED_HEADER: &str = "# Generated by iocman. Do not edit.";
