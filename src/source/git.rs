//! Shallow clone through the `git` executable.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::RepositorySource;
use crate::error::{PackagerError, Result};
use crate::logging::BuildLog;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// The clone process, shared so another thread can cancel it.
#[derive(Debug, Default)]
struct CloneState {
    child: Mutex<Option<Child>>,
    cancelled: AtomicBool,
}

impl CloneState {
    fn child(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
pub struct GitCloneSource {
    url: String,
    git_path: Option<PathBuf>,
    state: Arc<CloneState>,
}

impl GitCloneSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            git_path: None,
            state: Arc::default(),
        }
    }

    /// Use a specific git executable instead of looking one up on PATH.
    #[must_use]
    pub fn with_git_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.git_path = Some(path.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn resolve_git(&self) -> Result<PathBuf> {
        match &self.git_path {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(_) => Err(PackagerError::GitUnavailable),
            None => which::which("git").map_err(|_| PackagerError::GitUnavailable),
        }
    }

    fn clone_command(git: &Path, url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new(git);
        cmd.args(["clone", "--depth", "1", url])
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }

    /// Poll the registered child until it exits. `None` means it was taken
    /// away by [`cancel`](RepositorySource::cancel).
    fn wait_for_child(&self) -> Result<Option<ExitStatus>> {
        loop {
            {
                let mut slot = self.state.child();
                let Some(child) = slot.as_mut() else {
                    return Ok(None);
                };
                if let Some(status) = child.try_wait()? {
                    slot.take();
                    return Ok(Some(status));
                }
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl RepositorySource for GitCloneSource {
    fn fetch(&self, dest: &Path, log: &dyn BuildLog) -> Result<()> {
        let git = self.resolve_git()?;

        log.info(&format!("Cloning repository from {}...", self.url));

        {
            let mut slot = self.state.child();
            if self.state.cancelled.load(Ordering::SeqCst) {
                return Err(PackagerError::CloneFailed("clone cancelled".to_string()));
            }
            let mut child = Self::clone_command(&git, &self.url, dest)
                .spawn()
                .map_err(|err| match err.kind() {
                    std::io::ErrorKind::NotFound => PackagerError::GitUnavailable,
                    _ => PackagerError::CloneFailed(err.to_string()),
                })?;
            let stderr = child.stderr.take();
            *slot = Some(child);
            drop(slot);

            let stderr_handle = std::thread::spawn(move || {
                let mut buf = Vec::new();
                if let Some(mut reader) = stderr {
                    let _ = reader.read_to_end(&mut buf);
                }
                buf
            });

            let status = self.wait_for_child()?;
            let stderr_bytes = stderr_handle.join().unwrap_or_default();

            let Some(status) = status else {
                return Err(PackagerError::CloneFailed("clone cancelled".to_string()));
            };
            if !status.success() {
                let stderr = String::from_utf8_lossy(&stderr_bytes).trim().to_string();
                log.error(&format!("Git clone failed: {stderr}"));
                return Err(PackagerError::CloneFailed(stderr));
            }
        }

        log.info("Repository cloned successfully");
        Ok(())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }

    /// Kill a running clone and reap it; later fetches refuse to start.
    fn cancel(&self) {
        let mut slot = self.state.child();
        self.state.cancelled.store(true, Ordering::SeqCst);
        if let Some(mut child) = slot.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
