//! Terminal results of an extraction request.
//!
//! Every request ends in exactly one `ExtractionOutcome`. Errors never escape
//! the orchestrator; they are classified into a `FailureKind` here.

use crate::error::CoreError;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Failure taxonomy reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Source or destination path was empty.
    EmptyPath,
    InvalidDestinationExtension,
    SourceNotFound,
    /// Destination exists and overwriting is disabled.
    DestinationExists,
    /// Another request on the same extractor targets this destination.
    DestinationBusy,
    /// ffmpeg could not be started.
    LaunchFailure,
    /// ffmpeg exited non-zero while the strict exit policy is active.
    TranscodeFailed,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::EmptyPath => "Missing path",
            FailureKind::InvalidDestinationExtension => "Invalid destination extension",
            FailureKind::SourceNotFound => "Source not found",
            FailureKind::DestinationExists => "Destination exists",
            FailureKind::DestinationBusy => "Destination busy",
            FailureKind::LaunchFailure => "Launch failure",
            FailureKind::TranscodeFailed => "Transcode failed",
            FailureKind::Unknown => "Extraction failed",
        };
        f.write_str(label)
    }
}

/// Exit information of a finished transcoder process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessExit {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// The single terminal result of an extraction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Success {
        #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
        elapsed: Duration,
        destination: PathBuf,
        exit: ProcessExit,
    },
    Failure {
        kind: FailureKind,
        message: String,
    },
    Cancelled {
        #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
        elapsed: Duration,
    },
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

impl ExtractionOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        ExtractionOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Classifies an orchestration error.
    ///
    /// `Unknown` failures only carry a summary; the full error chain is
    /// logged at the boundary and never handed to the caller verbatim.
    pub fn from_error(err: &CoreError) -> Self {
        let kind = err.failure_kind();
        let message = match kind {
            FailureKind::Unknown => format!("Extraction failed: {err}"),
            _ => err.to_string(),
        };
        Self::failure(kind, message)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ExtractionOutcome::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Elapsed wall-clock time, when a process was actually run.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ExtractionOutcome::Success { elapsed, .. } | ExtractionOutcome::Cancelled { elapsed } => {
                Some(*elapsed)
            }
            ExtractionOutcome::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_process_exit_success() {
        assert!(ProcessExit::from_code(0).success());
        assert!(!ProcessExit::from_code(1).success());
        assert!(!ProcessExit { code: None }.success());
    }

    #[test]
    fn test_from_error_keeps_validation_message() {
        let err = CoreError::SourceNotFound(PathBuf::from("missing.mp4"));
        let outcome = ExtractionOutcome::from_error(&err);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::SourceNotFound));
        match outcome {
            ExtractionOutcome::Failure { message, .. } => assert!(message.contains("missing.mp4")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_from_error_summarises_unknown() {
        let err = CoreError::OperationFailed("worker panicked".to_string());
        match ExtractionOutcome::from_error(&err) {
            ExtractionOutcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::Unknown);
                assert!(message.starts_with("Extraction failed"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_elapsed_accessor() {
        let success = ExtractionOutcome::Success {
            elapsed: Duration::from_secs(3),
            destination: PathBuf::from("out.mp3"),
            exit: ProcessExit::from_code(0),
        };
        assert_eq!(success.elapsed(), Some(Duration::from_secs(3)));
        assert!(success.is_success());

        let failure = ExtractionOutcome::failure(FailureKind::Unknown, "x");
        assert_eq!(failure.elapsed(), None);
        assert!(!failure.is_success());
    }
}
