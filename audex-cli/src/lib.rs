// audex-cli/src/lib.rs
//
// Library portion of the Audex CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{CheckArgs, Cli, Commands, ExtractArgs};
pub use commands::check::run_check;
pub use commands::extract::run_extract;
pub use error::{CliResult, exit_code};
