//! Where the repository being packaged comes from.
//!
//! The build only needs a local directory holding the guide and examples.
//! [`GitCloneSource`] produces one with a shallow clone into a
//! [`CloneWorkspace`]; `--source-dir` skips both and points at an existing
//! checkout.

mod git;
mod workspace;

pub use git::GitCloneSource;
pub use workspace::CloneWorkspace;

use std::path::Path;

use crate::error::Result;
use crate::logging::BuildLog;

/// Materializes a repository checkout at a destination path.
pub trait RepositorySource {
    /// Populate `dest` (which must not exist yet) with the repository.
    fn fetch(&self, dest: &Path, log: &dyn BuildLog) -> Result<()>;

    /// Short human-readable origin, for log lines.
    fn describe(&self) -> String;

    /// Stop an in-flight [`fetch`](Self::fetch) from another thread.
    fn cancel(&self) {}
}
