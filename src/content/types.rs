use std::path::PathBuf;

use serde::Serialize;

/// One guide page, in TOC order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Original file name, also the name of the copy under `Guide/`.
    pub filename: String,
    pub title: String,
    pub description: String,
    pub source_path: PathBuf,
}

/// One example source file, in file-name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRecord {
    /// Sanitized file name, also the name of the copy under `Examples/`.
    pub filename: String,
    pub description: String,
    pub source_path: PathBuf,
}
