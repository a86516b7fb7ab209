//! Core library for extracting the audio track of a video file with ffmpeg.
//!
//! This crate validates a request, picks the encoder from the destination
//! extension, runs ffmpeg without blocking and reports the elapsed time to a
//! progress sink until the process ends. Every request produces exactly one
//! [`ExtractionOutcome`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use audex_core::{ExtractionOutcome, extract};
//!
//! let outcome = extract("lecture.mp4", "lecture.mp3", &mut |text: &str| println!("{text}"));
//! match outcome {
//!     ExtractionOutcome::Success { elapsed, .. } => println!("done in {elapsed:?}"),
//!     ExtractionOutcome::Failure { kind, message } => eprintln!("{kind}: {message}"),
//!     ExtractionOutcome::Cancelled { .. } => eprintln!("cancelled"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod extraction;
pub mod file_logging;
pub mod monitor;
pub mod outcome;
pub mod profile;
pub mod progress;
pub mod utils;
pub mod validation;

// Re-exports for public API
pub use config::{ExtractConfig, ExtractConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::check_dependency;
pub use extraction::{ExtractionJob, ExtractionRequest, Extractor, extract};
pub use monitor::{CancelHandle, CancelToken, cancellation};
pub use outcome::{ExtractionOutcome, FailureKind, ProcessExit};
pub use profile::AudioProfile;
pub use progress::{NullSink, ProgressLocale, ProgressSink};
pub use utils::{format_bytes, format_duration};
