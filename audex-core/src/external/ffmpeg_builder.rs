//! FFmpeg command construction for audio extraction.
//!
//! The builder produces a plain [`TranscodeCommand`] (program + argument
//! list) so spawners, mocks and logs all see exactly the same invocation.

use crate::config::ExtractConfig;
use crate::profile::EncodeParams;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A fully resolved ffmpeg invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeCommand {
    /// Explicit binary; `None` lets the spawner resolve ffmpeg itself
    pub program: Option<PathBuf>,
    pub args: Vec<OsString>,
}

impl TranscodeCommand {
    /// Name of the binary for logs and error messages.
    pub fn program_name(&self) -> String {
        self.program
            .as_ref()
            .map_or_else(|| "ffmpeg".to_string(), |p| p.display().to_string())
    }

    /// Arguments as lossy strings, mainly for assertions and logging.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for TranscodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name())?;
        for arg in self.args_lossy() {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Builder for the extraction command.
pub struct ExtractionCommandBuilder<'a> {
    source: &'a Path,
    destination: &'a Path,
    params: EncodeParams,
    program: Option<PathBuf>,
    log_level: String,
    overwrite: bool,
}

impl<'a> ExtractionCommandBuilder<'a> {
    #[must_use]
    pub fn new(source: &'a Path, destination: &'a Path, params: EncodeParams) -> Self {
        Self {
            source,
            destination,
            params,
            program: None,
            log_level: crate::config::DEFAULT_FFMPEG_LOG_LEVEL.to_string(),
            overwrite: false,
        }
    }

    /// Applies the binary path, log level and overwrite policy of a config.
    #[must_use]
    pub fn with_config(self, config: &ExtractConfig) -> Self {
        self.with_program(config.ffmpeg_path.clone())
            .with_log_level(&config.ffmpeg_log_level)
            .with_overwrite(config.overwrite)
    }

    #[must_use]
    pub fn with_program(mut self, program: Option<PathBuf>) -> Self {
        self.program = program;
        self
    }

    #[must_use]
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// `-y` when enabled, `-n` otherwise so ffmpeg never prompts.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn build(self) -> TranscodeCommand {
        let mut args: Vec<OsString> = Vec::new();
        let mut push = |arg: &str| args.push(OsString::from(arg));

        push("-hide_banner");
        push("-nostats");
        // "level+" prefixes each line with its severity for the stderr reader.
        push("-loglevel");
        push(&format!("level+{}", self.log_level));
        push(if self.overwrite { "-y" } else { "-n" });

        args.push("-i".into());
        args.push(self.source.as_os_str().to_os_string());

        if self.params.disable_video {
            args.push("-vn".into());
        }
        args.push("-c:a".into());
        args.push(self.params.codec.into());
        if let Some(bitrate) = self.params.bitrate {
            args.push("-b:a".into());
            args.push(bitrate.into());
        }
        args.push("-threads".into());
        args.push(self.params.threads.to_string().into());

        args.push(self.destination.as_os_str().to_os_string());

        TranscodeCommand {
            program: self.program,
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AudioProfile;

    fn build(profile: AudioProfile, overwrite: bool) -> Vec<String> {
        ExtractionCommandBuilder::new(
            Path::new("clip.mp4"),
            Path::new("out.audio"),
            profile.encode_params(),
        )
        .with_overwrite(overwrite)
        .build()
        .args_lossy()
    }

    #[test]
    fn test_mp3_command() {
        assert_eq!(
            build(AudioProfile::Mp3, false),
            vec![
                "-hide_banner", "-nostats", "-loglevel", "level+warning", "-n", "-i", "clip.mp4",
                "-vn", "-c:a", "libmp3lame", "-b:a", "192k", "-threads", "4", "out.audio",
            ]
        );
    }

    #[test]
    fn test_wav_command_has_no_bitrate() {
        let args = build(AudioProfile::Wav, true);
        assert!(args.contains(&"pcm_s16le".to_string()));
        assert!(!args.contains(&"-b:a".to_string()));
        assert!(args.contains(&"-y".to_string()));
        assert!(!args.contains(&"-n".to_string()));
    }

    #[test]
    fn test_destination_is_last_argument() {
        let args = build(AudioProfile::Aac, false);
        assert_eq!(args.last().map(String::as_str), Some("out.audio"));
    }

    #[test]
    fn test_with_config() {
        let config = crate::config::ExtractConfigBuilder::new()
            .ffmpeg_path("/usr/local/bin/ffmpeg")
            .ffmpeg_log_level("error")
            .overwrite(true)
            .build();
        let cmd = ExtractionCommandBuilder::new(
            Path::new("a b.mp4"),
            Path::new("out.aac"),
            AudioProfile::Aac.encode_params(),
        )
        .with_config(&config)
        .build();

        assert_eq!(cmd.program, Some(PathBuf::from("/usr/local/bin/ffmpeg")));
        assert!(cmd.args_lossy().windows(2).any(|w| w == ["-loglevel", "level+error"]));
        assert_eq!(
            cmd.to_string(),
            "/usr/local/bin/ffmpeg -hide_banner -nostats -loglevel level+error -y -i \"a b.mp4\" \
             -vn -c:a aac -b:a 192k -threads 4 out.aac"
        );
    }

    #[test]
    fn test_default_program_is_resolved_by_spawner() {
        let cmd = ExtractionCommandBuilder::new(
            Path::new("clip.mp4"),
            Path::new("out.wav"),
            AudioProfile::Wav.encode_params(),
        )
        .build();
        assert_eq!(cmd.program, None);
        assert_eq!(cmd.program_name(), "ffmpeg");
        assert!(!cmd.args_lossy().contains(&"-b:a".to_string()));
    }
}
