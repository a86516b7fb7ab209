// ============================================================================
// audex-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Log File Naming and Setup
//
// The diagnostic log is written by log4rs (configured in audex-core). This
// file decides where it goes and what it is called.

use audex_core::CoreResult;
use audex_core::file_logging::setup_file_logging;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("audex_extract_{}.log", audex_cli::logging::get_timestamp());
/// assert_eq!(log_filename.len(), "audex_extract_20240601_123045.log".len());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// `<destination dir>/logs`, or `./logs` for a bare file name.
pub fn default_log_dir(destination: &Path) -> PathBuf {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("logs"),
        _ => PathBuf::from("logs"),
    }
}

pub fn log_file_path(log_dir: &Path, timestamp: &str) -> PathBuf {
    log_dir.join(format!("audex_extract_{timestamp}.log"))
}

/// Installs the diagnostic log and returns its path.
pub fn init_logging(log_dir: &Path, verbose: bool) -> CoreResult<PathBuf> {
    let log_file = log_file_path(log_dir, &get_timestamp());
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    setup_file_logging(&log_file, level, verbose)?;
    Ok(log_file)
}
