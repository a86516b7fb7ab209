// audex-core/tests/dependency_tests.rs

use audex_core::{CoreError, check_dependency};
use std::ffi::OsStr;

#[test]
fn test_missing_dependency() {
    let result = check_dependency(OsStr::new("audex-test-definitely-missing-binary"));
    assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
}

#[cfg(unix)]
#[test]
fn test_dependency_version_line() -> Result<(), Box<dyn std::error::Error>> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ffmpeg");
    fs::write(&path, "#!/bin/sh\necho 'ffmpeg version 7.1 Copyright (c) 2000-2024'\necho 'built with gcc'\n")?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;

    let version = check_dependency(path.as_os_str())?;
    assert_eq!(version, "ffmpeg version 7.1 Copyright (c) 2000-2024");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failing_dependency() -> Result<(), Box<dyn std::error::Error>> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ffmpeg");
    fs::write(&path, "#!/bin/sh\nexit 3\n")?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;

    let err = check_dependency(path.as_os_str()).unwrap_err();
    assert!(matches!(err, CoreError::CommandFailed { .. }));
    Ok(())
}
