// ============================================================================
// audex-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Extraction Pipeline
//
// Every failure the orchestrator can run into is a `CoreError`. Nothing of
// this leaves the orchestrator boundary as an error: `Extractor` converts it
// into an `ExtractionOutcome::Failure` using `failure_kind()`.

use crate::outcome::FailureKind;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating, launching or monitoring an extraction.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No {0} path was provided")]
    EmptyPath(&'static str),

    #[error("Destination '{}' must end with .mp3, .aac or .wav", .0.display())]
    InvalidDestinationExtension(PathBuf),

    #[error("Source video '{}' does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Destination '{}' already exists (enable overwrite to replace it)", .0.display())]
    DestinationExists(PathBuf),

    #[error("Another extraction is already writing to '{}'", .0.display())]
    DestinationBusy(PathBuf),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{command} exited with {status}: {detail}")]
    CommandFailed {
        command: String,
        status: String,
        detail: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    OperationFailed(String),
}

impl CoreError {
    /// Maps the error onto the user-facing failure taxonomy.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            CoreError::EmptyPath(_) => FailureKind::EmptyPath,
            CoreError::InvalidDestinationExtension(_) => FailureKind::InvalidDestinationExtension,
            CoreError::SourceNotFound(_) => FailureKind::SourceNotFound,
            CoreError::DestinationExists(_) => FailureKind::DestinationExists,
            CoreError::DestinationBusy(_) => FailureKind::DestinationBusy,
            CoreError::DependencyNotFound(_) | CoreError::CommandStart(..) => {
                FailureKind::LaunchFailure
            }
            CoreError::CommandFailed { .. } => FailureKind::TranscodeFailed,
            CoreError::CommandWait(..)
            | CoreError::Config(_)
            | CoreError::Logging(_)
            | CoreError::Io(_)
            | CoreError::OperationFailed(_) => FailureKind::Unknown,
        }
    }
}

/// Result type for audex-core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error, turning a missing executable into `DependencyNotFound`.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    let command = command.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command)
    } else {
        CoreError::CommandStart(command, err)
    }
}

pub fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

pub fn command_failed_error(
    command: impl Into<String>,
    status: impl std::fmt::Display,
    detail: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status: status.to_string(),
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_becomes_dependency_not_found() {
        let err = command_start_error("ffmpeg", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name == "ffmpeg"));
        assert_eq!(err.failure_kind(), FailureKind::LaunchFailure);
    }

    #[test]
    fn test_permission_denied_stays_command_start() {
        let err = command_start_error(
            "ffmpeg",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, CoreError::CommandStart(..)));
        assert_eq!(err.failure_kind(), FailureKind::LaunchFailure);
    }

    #[test]
    fn test_failure_kind_mapping() {
        assert_eq!(
            CoreError::EmptyPath("source").failure_kind(),
            FailureKind::EmptyPath
        );
        assert_eq!(
            CoreError::SourceNotFound(PathBuf::from("x.mp4")).failure_kind(),
            FailureKind::SourceNotFound
        );
        assert_eq!(
            CoreError::InvalidDestinationExtension(PathBuf::from("x.ogg")).failure_kind(),
            FailureKind::InvalidDestinationExtension
        );
        assert_eq!(
            command_failed_error("ffmpeg", "exit status: 1", "boom").failure_kind(),
            FailureKind::TranscodeFailed
        );
        assert_eq!(
            command_wait_error("ffmpeg", io::Error::other("gone")).failure_kind(),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_messages_name_the_path() {
        let msg = CoreError::InvalidDestinationExtension(PathBuf::from("out.xyz")).to_string();
        assert!(msg.contains("out.xyz"));
        let msg = CoreError::SourceNotFound(PathBuf::from("missing.mp4")).to_string();
        assert!(msg.contains("missing.mp4"));
    }
}
