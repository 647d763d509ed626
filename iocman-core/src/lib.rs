//! Core utilities and types for the iocman IOC project manager.
//!
//! This crate provides file writing rules, filesystem helpers and the
//! small text parsers used across the iocman crates.

mod confirm;
mod file;
pub mod fs;
mod utils;

// Operator confirmation
pub use confirm::{AlwaysNo, AlwaysYes, Confirm};
// File operations
pub use file::{File, FileMode, FileRules, GeneratedFile, StagedFile, WriteResult};
// String utilities
pub use utils::{
    join_list, normalize_value, parse_condition, split_lines, split_list, toml_value_to_string,
};
