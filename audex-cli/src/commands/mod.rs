//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `extract` command.
/// Runs one extraction and reports its outcome.
pub mod extract;

/// Module containing the implementation of the `check` command.
pub mod check;
