//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::fs::{File, FileTimes};
use std::io;
use std::path::Path;

use crate::error::Result;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Remove `path` if present and create it again, empty.
pub fn reset_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Copy a file, keeping its permissions and access/modification times.
pub fn copy_preserving(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let (src, dest) = (src.as_ref(), dest.as_ref());

    // Permissions travel with std::fs::copy.
    std::fs::copy(src, dest)?;

    let metadata = std::fs::metadata(src)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    match File::options().write(true).open(dest) {
        Ok(file) => file.set_times(times)?,
        // A read-only source yields a read-only copy; its times stay as written.
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {}
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// The first of `candidates` that exists as a file under `dir`.
pub fn first_existing<'a>(dir: impl AsRef<Path>, candidates: &'a [String]) -> Option<&'a str> {
    let dir = dir.as_ref();
    candidates
        .iter()
        .find(|name| dir.join(name).is_file())
        .map(String::as_str)
}
