// ============================================================================
// audex-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ExtractConfig
//
// Fluent construction of an ExtractConfig. Every field starts from the
// defaults in config/mod.rs; validation stays on ExtractConfig::validate.

use std::path::PathBuf;
use std::time::Duration;

use super::ExtractConfig;
use crate::progress::ProgressLocale;

/// Builder for creating ExtractConfig instances.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific ffmpeg binary instead of the one on PATH.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = Some(path.into());
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Rejects requests whose destination already exists.
    pub fn refuse_existing_destination(mut self, refuse: bool) -> Self {
        self.config.refuse_existing_destination = refuse;
        self
    }

    pub fn strict_exit_status(mut self, strict: bool) -> Self {
        self.config.strict_exit_status = strict;
        self
    }

    pub fn locale(mut self, locale: ProgressLocale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn ffmpeg_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.ffmpeg_log_level = level.into();
        self
    }

    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        let built = ExtractConfigBuilder::new().build();
        let default = ExtractConfig::default();
        assert_eq!(built.tick_interval, default.tick_interval);
        assert_eq!(built.overwrite, default.overwrite);
        assert_eq!(
            built.refuse_existing_destination,
            default.refuse_existing_destination
        );
        assert_eq!(built.ffmpeg_log_level, default.ffmpeg_log_level);
        assert!(built.ffmpeg_path.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = ExtractConfigBuilder::new()
            .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .tick_interval(Duration::from_millis(250))
            .overwrite(true)
            .refuse_existing_destination(true)
            .strict_exit_status(true)
            .locale(ProgressLocale::Chinese)
            .ffmpeg_log_level("error")
            .build();

        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert!(config.overwrite);
        assert!(config.refuse_existing_destination);
        assert!(!config.rejects_existing_destination());
        assert!(config.strict_exit_status);
        assert_eq!(config.locale, ProgressLocale::Chinese);
        assert_eq!(config.ffmpeg_log_level, "error");
        assert!(config.validate().is_ok());
    }
}
