//! Audio profile selection.
//!
//! The destination file's extension alone decides which encoder ffmpeg is
//! asked to use. Matching is an exact, case-sensitive suffix match.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Bitrate used by the lossy profiles.
pub const DEFAULT_AUDIO_BITRATE: &str = "192k";

/// Worker threads handed to ffmpeg for every profile.
pub const DEFAULT_ENCODE_THREADS: u32 = 4;


/// Output profile derived from the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioProfile {
    Mp3,
    Wav,
    Aac,
}

/// Profiles in the order their extensions are checked.
pub const SUPPORTED_PROFILES: [AudioProfile; 3] = [AudioProfile::Mp3, AudioProfile::Aac, AudioProfile::Wav];

/// Encoder settings passed to ffmpeg for a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    /// ffmpeg audio codec name (`-c:a`)
    pub codec: &'static str,
    /// Target audio bitrate (`-b:a`), `None` for uncompressed PCM
    pub bitrate: Option<&'static str>,
    /// ffmpeg worker threads (`-threads`)
    pub threads: u32,
    /// Drop the video stream from the output (`-vn`)
    pub disable_video: bool,
}

impl AudioProfile {
    /// Selects the profile for a destination path.
    ///
    /// Returns `InvalidDestinationExtension` unless the path ends with the
    /// extension of one of [`SUPPORTED_PROFILES`].
    pub fn from_destination(destination: &Path) -> CoreResult<Self> {
        let path_str = destination.to_string_lossy();
        SUPPORTED_PROFILES
            .into_iter()
            .find(|profile| path_str.ends_with(profile.extension()))
            .ok_or_else(|| CoreError::InvalidDestinationExtension(destination.to_path_buf()))
    }

    #[must_use]
    pub fn encode_params(self) -> EncodeParams {
        let (codec, bitrate) = match self {
            AudioProfile::Mp3 => ("libmp3lame", Some(DEFAULT_AUDIO_BITRATE)),
            AudioProfile::Wav => ("pcm_s16le", None),
            AudioProfile::Aac => ("aac", Some(DEFAULT_AUDIO_BITRATE)),
        };
        EncodeParams {
            codec,
            bitrate,
            threads: DEFAULT_ENCODE_THREADS,
            disable_video: true,
        }
    }

    /// File extension, including the dot, that selects this profile.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            AudioProfile::Mp3 => ".mp3",
            AudioProfile::Wav => ".wav",
            AudioProfile::Aac => ".aac",
        }
    }
}

impl fmt::Display for AudioProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.encode_params();
        let name = match self {
            AudioProfile::Mp3 => "MP3",
            AudioProfile::Wav => "WAV",
            AudioProfile::Aac => "AAC",
        };
        match params.bitrate {
            Some(bitrate) => write!(f, "{name} ({}, {bitrate})", params.codec),
            None => write!(f, "{name} ({})", params.codec),
        }
    }
}
