//! Progress reporting towards the caller.
//!
//! The orchestrator only knows how to hand a short, localised elapsed-time
//! string to a `ProgressSink`. How that string is shown (label, spinner,
//! status bar) is entirely up to the caller.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Receives elapsed-time updates while an extraction runs.
///
/// Called synchronously from the extraction worker once per tick and once at
/// completion, so implementations must return quickly.
pub trait ProgressSink: Send {
    fn report(&mut self, text: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(&str) + Send,
{
    fn report(&mut self, text: &str) {
        self(text)
    }
}

/// Sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _text: &str) {}
}

/// Language of the elapsed-time strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressLocale {
    #[default]
    English,
    Chinese,
}

impl ProgressLocale {
    /// Formats whole elapsed seconds, truncating the fraction so successive
    /// updates never go backwards.
    #[must_use]
    pub fn format_elapsed(self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs();
        match self {
            ProgressLocale::English => format!("Extraction time: {secs} s"),
            ProgressLocale::Chinese => format!("提取时间：{secs} 秒"),
        }
    }
}

impl FromStr for ProgressLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(ProgressLocale::English),
            "zh" | "chinese" => Ok(ProgressLocale::Chinese),
            other => Err(format!("unsupported locale '{other}' (expected en or zh)")),
        }
    }
}

impl fmt::Display for ProgressLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressLocale::English => f.write_str("en"),
            ProgressLocale::Chinese => f.write_str("zh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_truncates() {
        let locale = ProgressLocale::English;
        assert_eq!(locale.format_elapsed(Duration::ZERO), "Extraction time: 0 s");
        assert_eq!(
            locale.format_elapsed(Duration::from_millis(2999)),
            "Extraction time: 2 s"
        );
        assert_eq!(
            ProgressLocale::Chinese.format_elapsed(Duration::from_secs(3)),
            "提取时间：3 秒"
        );
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<ProgressLocale>().unwrap(), ProgressLocale::English);
        assert_eq!("ZH".parse::<ProgressLocale>().unwrap(), ProgressLocale::Chinese);
        assert!("fr".parse::<ProgressLocale>().is_err());
    }

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |text: &str| seen.push(text.to_string());
            sink.report("a");
            sink.report("b");
        }
        assert_eq!(seen, vec!["a", "b"]);
    }
}
