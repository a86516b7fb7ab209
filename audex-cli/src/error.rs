// ============================================================================
// audex-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result Alias and Exit Codes
//
// Command functions return `CliResult`; `main` prints any error and exits
// with EXIT_FAILURE. Outcomes of a finished extraction map to exit codes here.

use audex_core::{CoreResult, ExtractionOutcome};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Conventional code for an interrupted run (128 + SIGINT).
pub const EXIT_CANCELLED: i32 = 130;

pub fn exit_code(outcome: &ExtractionOutcome) -> i32 {
    match outcome {
        ExtractionOutcome::Success { .. } => EXIT_SUCCESS,
        ExtractionOutcome::Failure { .. } => EXIT_FAILURE,
        ExtractionOutcome::Cancelled { .. } => EXIT_CANCELLED,
    }
}
