use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// On-disk stand-in for a cloned guide repository.
///
/// Lays files out the way the default configuration expects them:
/// `Guide.docc/*.md`, `Sources/Examples/*.swift`, and a license at the root.
pub struct RepoFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl RepoFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("repo");
        std::fs::create_dir_all(&root).expect("Failed to create repo root");

        println!("[FIXTURE] Created repo root: {root:?}");

        Self { temp_dir, root }
    }

    /// Fixture with a two-page guide, one example and a license.
    pub fn standard() -> Self {
        let fixture = Self::new();
        fixture.create_toc("# Migration Guide\n\n## Topics\n\n- <doc:DataRaceSafety>\n- <doc:MigrationStrategy>\n");
        fixture.create_doc(
            "DataRaceSafety",
            "# Data Race Safety\n\nLearn about the fundamental concepts Swift uses.\n",
        );
        fixture.create_doc(
            "MigrationStrategy",
            "# Migration Strategy\n\n@Metadata {\n  @Available(Swift, introduced: \"6.0\")\n}\n\nGet started migrating your project.\n",
        );
        fixture.create_example(
            "Actor+Isolation.swift",
            "/// Demonstrates actor isolation.\nactor Counter {}\n",
        );
        fixture.create_file("LICENSE.txt", "Apache License\nVersion 2.0\n");
        fixture
    }

    /// Path where a sibling output directory can be placed.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Create a file relative to the repo root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    pub fn create_toc(&self, content: &str) -> PathBuf {
        self.create_file("Guide.docc/MigrationGuide.md", content)
    }

    pub fn create_doc(&self, stem: &str, content: &str) -> PathBuf {
        self.create_file(&format!("Guide.docc/{stem}.md"), content)
    }

    pub fn create_example(&self, filename: &str, content: &str) -> PathBuf {
        self.create_file(&format!("Sources/Examples/{filename}"), content)
    }

    pub fn remove(&self, relative_path: &str) {
        let path = self.root.join(relative_path);
        if path.is_dir() {
            std::fs::remove_dir_all(&path).expect("Failed to remove dir");
        } else {
            std::fs::remove_file(&path).expect("Failed to remove file");
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Default for RepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RepoFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.temp_dir.path());
    }
}
