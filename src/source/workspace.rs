//! Scoped temporary directory for a repository clone.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::logging::BuildLog;

const TEMP_PREFIX: &str = "skill-packager-";

/// Owns the temporary clone directory.
///
/// [`release`](Self::release) removes it, or persists it when keep-temp was
/// requested. Dropping an unreleased workspace does the same silently.
#[derive(Debug)]
pub struct CloneWorkspace {
    temp_dir: Option<TempDir>,
    root: PathBuf,
    keep: bool,
}

impl CloneWorkspace {
    /// Create a fresh directory under the system temp location.
    pub fn create(keep: bool) -> Result<Self> {
        let temp_dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
        Ok(Self::from_temp_dir(temp_dir, keep))
    }

    /// Create a fresh directory under `parent`.
    pub fn create_in(parent: impl AsRef<Path>, keep: bool) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(parent)?;
        Ok(Self::from_temp_dir(temp_dir, keep))
    }

    fn from_temp_dir(temp_dir: TempDir, keep: bool) -> Self {
        let root = temp_dir.path().to_path_buf();
        Self {
            temp_dir: Some(temp_dir),
            root,
            keep,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the checkout goes. Not created; `git clone` wants to make it.
    pub fn repo_dir(&self) -> PathBuf {
        self.root.join("repo")
    }

    pub const fn keeps_files(&self) -> bool {
        self.keep
    }

    /// Remove the directory, or keep it and return its path.
    pub fn release(mut self, log: &dyn BuildLog) -> Option<PathBuf> {
        let temp_dir = self.temp_dir.take()?;

        if self.keep {
            let path = temp_dir.keep();
            log.info(&format!("Temp directory retained: {}", path.display()));
            return Some(path);
        }

        if let Err(err) = temp_dir.close() {
            log.warn(&format!("Failed to clean up temp dir: {err}"));
        }
        None
    }
}

impl Drop for CloneWorkspace {
    fn drop(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            if self.keep {
                let _ = temp_dir.keep();
            }
        }
    }
}
