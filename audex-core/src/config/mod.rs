//! Configuration structures and constants for the audex-core library.
//!
//! The configuration governs how ffmpeg is located and invoked and how the
//! progress monitor behaves. Profile parameters are not configurable: they
//! follow from the destination extension alone.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::progress::ProgressLocale;

use std::path::PathBuf;
use std::time::Duration;

pub use builder::ExtractConfigBuilder;

// Default constants

/// Default interval between two progress ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Longest tick interval accepted before progress would look stalled.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Default ffmpeg `-loglevel`. Warnings and errors still reach the diagnostic log.
pub const DEFAULT_FFMPEG_LOG_LEVEL: &str = "warning";

/// Level names accepted by ffmpeg's `-loglevel`.
pub const FFMPEG_LOG_LEVELS: [&str; 9] = [
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Runtime configuration for an [`crate::Extractor`].
///
/// # Examples
///
/// ```rust
/// use audex_core::config::ExtractConfigBuilder;
/// use audex_core::progress::ProgressLocale;
/// use std::time::Duration;
///
/// let config = ExtractConfigBuilder::new()
///     .tick_interval(Duration::from_millis(500))
///     .overwrite(true)
///     .locale(ProgressLocale::Chinese)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Explicit ffmpeg binary; `None` resolves `ffmpeg` from PATH
    pub ffmpeg_path: Option<PathBuf>,

    /// Interval between progress ticks while ffmpeg is running
    pub tick_interval: Duration,

    /// Replace an existing destination file (`-y`). Without it ffmpeg runs
    /// with `-n` and leaves the file alone.
    pub overwrite: bool,

    /// Reject a request whose destination already exists before spawning
    /// ffmpeg. Has no effect together with `overwrite`.
    pub refuse_existing_destination: bool,

    /// Treat a non-zero ffmpeg exit status as a failure.
    /// Off by default: any exit of the process counts as completion.
    pub strict_exit_status: bool,

    /// Language of the progress strings
    pub locale: ProgressLocale,

    /// Value passed to ffmpeg's `-loglevel`
    pub ffmpeg_log_level: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            overwrite: false,
            refuse_existing_destination: false,
            strict_exit_status: false,
            locale: ProgressLocale::default(),
            ffmpeg_log_level: DEFAULT_FFMPEG_LOG_LEVEL.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval.is_zero() {
            return Err(CoreError::Config(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        if self.tick_interval > MAX_TICK_INTERVAL {
            return Err(CoreError::Config(format!(
                "tick interval {:?} exceeds the maximum of {:?}",
                self.tick_interval, MAX_TICK_INTERVAL
            )));
        }
        if !FFMPEG_LOG_LEVELS.contains(&self.ffmpeg_log_level.as_str()) {
            return Err(CoreError::Config(format!(
                "unknown ffmpeg log level '{}'",
                self.ffmpeg_log_level
            )));
        }
        if let Some(path) = &self.ffmpeg_path {
            if path.as_os_str().is_empty() {
                return Err(CoreError::Config("ffmpeg path is empty".to_string()));
            }
        }
        Ok(())
    }

    /// Whether an existing destination is rejected during validation.
    pub fn rejects_existing_destination(&self) -> bool {
        self.refuse_existing_destination && !self.overwrite
    }

    /// Name used for the ffmpeg binary in logs and error messages.
    pub fn ffmpeg_display_name(&self) -> String {
        self.ffmpeg_path
            .as_ref()
            .map_or_else(|| "ffmpeg".to_string(), |p| p.display().to_string())
    }
}
