//! Pre-launch checks for an extraction request.
//!
//! All checks run before any process is spawned, in this order: empty paths,
//! destination extension, source existence, destination collision. The
//! collision check only runs when the caller asks for it; by default an
//! existing destination is left for ffmpeg's `-n` to deal with.

use crate::error::{CoreError, CoreResult};
use crate::profile::AudioProfile;

use std::path::Path;

/// Validates a request and returns the profile selected for it.
pub fn validate_paths(
    source: &Path,
    destination: &Path,
    reject_existing: bool,
) -> CoreResult<AudioProfile> {
    if source.as_os_str().is_empty() {
        return Err(CoreError::EmptyPath("source"));
    }
    if destination.as_os_str().is_empty() {
        return Err(CoreError::EmptyPath("destination"));
    }

    let profile = AudioProfile::from_destination(destination)?;

    if !source.exists() {
        return Err(CoreError::SourceNotFound(source.to_path_buf()));
    }
    log::debug!("Source check passed: {} exists", source.display());

    if reject_existing && destination.exists() {
        return Err(CoreError::DestinationExists(destination.to_path_buf()));
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_empty_paths_rejected_first() {
        let err = validate_paths(Path::new(""), Path::new("out.xyz"), false).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPath("source")));

        let err = validate_paths(Path::new("clip.mp4"), Path::new(""), false).unwrap_err();
        assert!(matches!(err, CoreError::EmptyPath("destination")));
    }

    #[test]
    fn test_extension_checked_before_existence() {
        // Neither condition holds; the extension error must win.
        let err = validate_paths(
            Path::new("surely/missing/clip.mp4"),
            Path::new("out.xyz"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDestinationExtension(_)));
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.mp4");
        let err = validate_paths(&source, &dir.path().join("out.wav"), false).unwrap_err();
        assert!(matches!(err, CoreError::SourceNotFound(ref p) if p == &source));
    }

    #[test]
    fn test_valid_request_selects_profile() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("clip.mp4");
        File::create(&source).unwrap();

        let profile = validate_paths(&source, &dir.path().join("out.mp3"), false).unwrap();
        assert_eq!(profile, AudioProfile::Mp3);
    }

    #[test]
    fn test_existing_destination_rejected_only_on_request() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("clip.mp4");
        let destination: PathBuf = dir.path().join("out.aac");
        File::create(&source).unwrap();
        File::create(&destination).unwrap();

        let profile = validate_paths(&source, &destination, false).unwrap();
        assert_eq!(profile, AudioProfile::Aac);

        let err = validate_paths(&source, &destination, true).unwrap_err();
        assert!(matches!(err, CoreError::DestinationExists(_)));
    }
}
