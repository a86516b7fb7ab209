// ============================================================================
// audex-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Binary
//
// This module encapsulates everything that touches the external transcoder:
// building its command line, spawning and supervising the process, and
// checking that the binary is available at all.
//
// KEY COMPONENTS:
// - ExtractionCommandBuilder / TranscodeCommand: the ffmpeg invocation
// - TranscodeSpawner / TranscodeProcess: traits for process management
// - SidecarSpawner: implementation using the ffmpeg-sidecar crate
// - check_dependency: presence check used by the CLI
//
// DESIGN PHILOSOPHY:
// The orchestrator is generic over TranscodeSpawner, so tests can inject the
// mock spawner from `mocks` instead of launching ffmpeg.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builds the ffmpeg argument list for an extraction
pub mod ffmpeg_builder;

/// Traits and implementations for spawning ffmpeg
pub mod ffmpeg_executor;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{ExtractionCommandBuilder, TranscodeCommand};
pub use ffmpeg_executor::{SidecarProcess, SidecarSpawner, TranscodeProcess, TranscodeSpawner};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be executed.
///
/// Runs `<program> -version` and returns the first line of its output, e.g.
/// `ffmpeg version 7.1 Copyright (c) 2000-2024 the FFmpeg developers`.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the program does not exist
/// * `CoreError::CommandStart` - the program exists but could not be started
/// * `CoreError::CommandFailed` - the program ran but reported a failure
pub fn check_dependency(program: &OsStr) -> CoreResult<String> {
    let display_name = program.to_string_lossy().into_owned();

    let output = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| {
            log::warn!("Dependency check for '{}' failed: {}", display_name, e);
            command_start_error(display_name.as_str(), e)
        })?;

    if !output.status.success() {
        return Err(crate::error::command_failed_error(
            display_name,
            output.status,
            "version check failed",
        ));
    }

    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    log::debug!("Found dependency {}: {}", display_name, version);

    if version.is_empty() {
        return Err(CoreError::OperationFailed(format!(
            "'{display_name}' printed no version information"
        )));
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_missing_binary() {
        let err = check_dependency(OsStr::new("surely-not-an-installed-ffmpeg")).unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(_)));
    }
}
