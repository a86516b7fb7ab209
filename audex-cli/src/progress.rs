// ============================================================================
// audex-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Spinner Sink for the Extraction Worker
//
// The core hands a localised "elapsed time" string to its progress sink once
// per tick. Here that string becomes the message of an indicatif spinner.

use audex_core::ProgressSink;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress sink that shows every update on a spinner.
///
/// Clones share the same spinner, so the worker thread can own one while
/// the command keeps another to clear it at the end.
#[derive(Clone)]
pub struct SpinnerSink {
    bar: ProgressBar,
}

impl SpinnerSink {
    /// Spinner on stderr. Hidden when `visible` is false (e.g. `--json`).
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
        {
            bar.set_style(style);
        }
        if visible {
            bar.enable_steady_tick(Duration::from_millis(120));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for SpinnerSink {
    fn report(&mut self, text: &str) {
        log::debug!("Progress: {}", text);
        self.bar.set_message(text.to_string());
    }
}
