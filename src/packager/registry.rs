//! Ordered document/example registries.
//!
//! Documents follow TOC order; examples follow file-name order. When an
//! output directory is given, every registered file is copied into it as it
//! is registered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::{EXAMPLES_DIR, GUIDE_DIR};
use crate::config::SourceConfig;
use crate::content::{
    DocumentRecord, ExampleRecord, FilenameSanitizer, extract_example_metadata, extract_metadata,
};
use crate::error::{PackagerError, Result};
use crate::logging::BuildLog;
use crate::utils::fs::{copy_preserving, ensure_dir};

/// Everything the index is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub documents: Vec<DocumentRecord>,
    pub examples: Vec<ExampleRecord>,
}

pub struct RegistryBuilder<'a> {
    source: &'a SourceConfig,
    repo_root: &'a Path,
    output: Option<&'a Path>,
    sanitizer: &'a FilenameSanitizer,
    log: &'a dyn BuildLog,
}

impl<'a> RegistryBuilder<'a> {
    /// `output` of `None` registers without copying anything (dry run).
    pub fn new(
        source: &'a SourceConfig,
        repo_root: &'a Path,
        output: Option<&'a Path>,
        sanitizer: &'a FilenameSanitizer,
        log: &'a dyn BuildLog,
    ) -> Self {
        Self {
            source,
            repo_root,
            output,
            sanitizer,
            log,
        }
    }

    pub fn guide_root(&self) -> PathBuf {
        self.repo_root.join(&self.source.guide_dir)
    }

    pub fn examples_root(&self) -> PathBuf {
        self.repo_root.join(&self.source.examples_dir)
    }

    pub fn build(&self, doc_order: &[String]) -> Result<Registry> {
        let documents = self.process_documents(doc_order)?;
        let examples = self.process_examples()?;
        Ok(Registry {
            documents,
            examples,
        })
    }

    /// Markdown files directly under the guide root, keyed by stem, minus
    /// the TOC itself.
    pub fn document_files(&self) -> Result<HashMap<String, PathBuf>> {
        let mut files = HashMap::new();
        for path in list_files(&self.guide_root(), "md")? {
            let is_toc = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy() == self.source.toc_file);
            if is_toc {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                files.insert(stem.to_string_lossy().into_owned(), path);
            }
        }
        Ok(files)
    }

    /// Example sources directly under the examples root, sorted by name.
    /// A missing examples root is an empty set.
    pub fn example_files(&self) -> Result<Vec<PathBuf>> {
        list_files(&self.examples_root(), &self.source.example_extension)
    }

    fn process_documents(&self, doc_order: &[String]) -> Result<Vec<DocumentRecord>> {
        let file_map = self.document_files()?;
        let mut documents = Vec::new();

        for reference in doc_order {
            let Some(source_path) = file_map.get(reference) else {
                continue;
            };

            let record = extract_metadata(source_path)?;
            if let Some(output) = self.output {
                let dest_dir = output.join(GUIDE_DIR);
                ensure_dir(&dest_dir)?;
                copy_preserving(source_path, dest_dir.join(&record.filename))?;
            }
            documents.push(record);
        }

        if documents.is_empty() {
            return Err(PackagerError::NoDocuments);
        }

        self.log
            .info(&format!("Processed {} documentation files", documents.len()));
        Ok(documents)
    }

    fn process_examples(&self) -> Result<Vec<ExampleRecord>> {
        let files = self.example_files()?;

        if files.is_empty() {
            self.log.warn(&format!(
                "No example files found in {}",
                self.source.examples_dir
            ));
            return Ok(Vec::new());
        }

        let mut examples = Vec::with_capacity(files.len());
        for source_path in files {
            let record = extract_example_metadata(&source_path, self.sanitizer)?;
            if let Some(output) = self.output {
                let dest_dir = output.join(EXAMPLES_DIR);
                ensure_dir(&dest_dir)?;
                copy_preserving(&source_path, dest_dir.join(&record.filename))?;
            }
            examples.push(record);
        }

        self.log
            .info(&format!("Processed {} example files", examples.len()));
        Ok(examples)
    }
}

/// Non-hidden files (following symlinks) directly inside `dir` with
/// `extension`, in file-name order. Nothing is returned for a missing
/// directory.
fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy() == extension);
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
