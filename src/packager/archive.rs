//! Zip archive of the output directory.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{PackagerError, Result};

/// `<output>.zip`, next to the output directory.
#[must_use]
pub fn archive_path_for(output_dir: &Path) -> PathBuf {
    let mut name = OsString::from(output_dir.as_os_str());
    name.push(".zip");
    PathBuf::from(name)
}

/// Entry name inside the archive: the top-level folder plus the relative
/// path, always `/`-separated.
fn entry_name(base: &str, relative: &Path) -> String {
    let mut parts = vec![base.to_string()];
    parts.extend(relative.components().filter_map(|component| match component {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
    }));
    parts.join("/")
}

/// Zip `output_dir` into [`archive_path_for`]`(output_dir)`.
///
/// Entries sit under a folder named after the output directory and are
/// written in sorted order.
pub fn create_archive(output_dir: &Path) -> Result<PathBuf> {
    let base = output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            PackagerError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output path has no directory name: {}", output_dir.display()),
            ))
        })?;

    let archive_path = archive_path_for(output_dir);
    let mut zip = ZipWriter::new(BufWriter::new(File::create(&archive_path)?));
    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(output_dir)
            .unwrap_or_else(|_| entry.path());
        let name = entry_name(&base, relative);

        let options = with_permissions(deflated(), &entry.metadata()?);
        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
        } else {
            zip.start_file(name, options)?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, &mut zip)?;
        }
    }

    zip.finish()?;
    Ok(archive_path)
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &std::fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _metadata: &std::fs::Metadata) -> SimpleFileOptions {
    options
}
