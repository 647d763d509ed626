//! Core operations.
//!
//! This module contains the logic behind the iocman commands that build a
//! report, separated from CLI argument parsing and output rendering.

pub mod check;
pub mod show;

pub use check::check;
pub use show::show;
