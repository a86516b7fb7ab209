// ============================================================================
// audex-cli/src/commands/check.rs
// ============================================================================
//
// CHECK COMMAND: Verify the ffmpeg Dependency
//
// Runs `ffmpeg -version` (or the configured binary) and prints the version
// line, so a broken installation shows up before the first extraction.

use crate::cli::CheckArgs;
use crate::error::CliResult;
use crate::terminal;

use audex_core::check_dependency;
use std::ffi::OsStr;

/// Returns the version line reported by ffmpeg.
pub fn run_check(args: &CheckArgs) -> CliResult<String> {
    let program = args
        .ffmpeg
        .as_deref()
        .map_or(OsStr::new("ffmpeg"), |p| p.as_os_str());

    terminal::print_section("Dependency check");
    let version = check_dependency(program)?;
    terminal::print_status("ffmpeg", &program.to_string_lossy(), false);
    terminal::print_status("Version", &version, true);
    terminal::print_success("External dependency check passed.");
    Ok(version)
}
