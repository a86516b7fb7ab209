//! log4rs setup for the diagnostic log.
//!
//! Every record goes to a plain-text file. With `console` enabled the same
//! records are mirrored to stderr, which keeps stdout free for the outcome.

use crate::error::{CoreError, CoreResult};

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;

/// Line layout of the log file.
pub const FILE_LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

const CONSOLE_LOG_PATTERN: &str = "[{l}] {m}{n}";

/// Builds the log4rs configuration without installing it.
pub fn build_logging_config(log_file: &Path, log_level: LevelFilter, console: bool) -> CoreResult<Config> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_LOG_PATTERN)))
        .build(log_file)
        .map_err(|e| CoreError::Logging(format!("{}: {}", log_file.display(), e)))?;

    let mut builder = Config::builder().appender(Appender::builder().build("file", Box::new(file_appender)));
    let mut root = Root::builder().appender("file");

    if console {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stderr", Box::new(stderr)));
        root = root.appender("stderr");
    }

    builder
        .build(root.build(log_level))
        .map_err(|e| CoreError::Logging(e.to_string()))
}

/// Installs file logging (and optionally stderr logging) as the global logger.
///
/// Can only succeed once per process.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter, console: bool) -> CoreResult<()> {
    let config = build_logging_config(log_file, log_level, console)?;
    log4rs::init_config(config).map_err(|e| CoreError::Logging(e.to_string()))?;
    log::debug!("Logging to {}", log_file.display());
    Ok(())
}
