use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use skill_packager::test_utils::fixtures::RepoFixture;

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a file exists at the given path
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!(
            std::path::Path::new($path).exists(),
            "Expected file to exist: {:?}",
            $path
        );
    };
}

/// Assert that a file contains expected content
#[macro_export]
macro_rules! assert_file_contains {
    ($path:expr, $expected:expr) => {{
        let content =
            std::fs::read_to_string($path).expect(&format!("Failed to read {:?}", $path));
        assert!(
            content.contains($expected),
            "File {:?} does not contain '{}'\nActual content:\n{}",
            $path,
            $expected,
            &content[..std::cmp::min(content.len(), 500)]
        );
    }};
}

/// Assert command exit code
#[macro_export]
macro_rules! assert_exit_code {
    ($output:expr, $code:expr) => {
        assert_eq!(
            $output.exit_code, $code,
            "Expected exit code {} but got {}\nstdout: {}\nstderr: {}",
            $code, $output.exit_code, $output.stdout, $output.stderr
        );
    };
}

// =============================================================================
// Fixture
// =============================================================================

/// A guide repository on disk plus a scratch area for packager output.
pub struct TestFixture {
    pub repo: RepoFixture,
    start_time: Instant,
    test_name: String,
}

impl TestFixture {
    /// Empty repository root.
    pub fn new(test_name: &str) -> Self {
        Self::wrap(test_name, RepoFixture::new())
    }

    /// Repository with two guide pages, one example and a license.
    pub fn standard(test_name: &str) -> Self {
        Self::wrap(test_name, RepoFixture::standard())
    }

    fn wrap(test_name: &str, repo: RepoFixture) -> Self {
        println!("\n{}", "=".repeat(70));
        println!("[FIXTURE] Test: {test_name}");
        println!("[FIXTURE] Repo: {:?}", repo.path());
        println!("{}", "=".repeat(70));

        Self {
            repo,
            start_time: Instant::now(),
            test_name: test_name.to_string(),
        }
    }

    /// Scratch directory holding the repo and any outputs.
    pub fn scratch(&self) -> &Path {
        self.repo.temp_dir.path()
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.repo.output_path(name)
    }

    /// Run the packager binary against the fixture repository.
    pub fn run_packager(&self, args: &[&str]) -> CommandOutput {
        let start = Instant::now();
        println!("\n[CMD] skill-packager {}", args.join(" "));

        let output = Command::new(env!("CARGO_BIN_EXE_skill-packager"))
            .arg("--source-dir")
            .arg(self.repo.path())
            .args(args)
            .env("HOME", self.scratch())
            .env("XDG_CONFIG_HOME", self.scratch().join(".config"))
            .env_remove("SKILL_PACKAGER_CONFIG")
            .env_remove("SKILL_PACKAGER_REPO_URL")
            .env_remove("SKILL_PACKAGER_SKILL_NAME")
            .env_remove("SKILL_PACKAGER_EXAMPLE_EXTENSION")
            .env_remove("RUST_LOG")
            .current_dir(self.scratch())
            .output()
            .expect("Failed to execute skill-packager");

        let output = CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            elapsed: start.elapsed(),
        };

        println!("[CMD] Exit code: {}", output.exit_code);
        println!("[CMD] Timing: {:?}", output.elapsed);
        if !output.stderr.is_empty() {
            println!("[STDERR]\n{}", output.stderr);
        }
        output
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        println!("\n{}", "=".repeat(70));
        println!("[FIXTURE] Test complete: {}", self.test_name);
        println!("[FIXTURE] Total time: {:?}", self.start_time.elapsed());
        println!("{}\n", "=".repeat(70));
    }
}

#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CommandOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
