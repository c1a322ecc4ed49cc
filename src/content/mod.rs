//! Content extraction: TOC ordering and title/description heuristics.
//!
//! Everything here is read-only with respect to the filesystem. Extractors
//! never fail on odd input; they fall back to defaults derived from the
//! file name.

pub mod example;
pub mod markdown;
pub mod toc;
pub mod types;

pub use example::{FilenameSanitizer, extract_example_metadata, example_metadata_from_str};
pub use markdown::{NO_DESCRIPTION, document_metadata_from_str, extract_metadata};
pub use toc::{parse_toc_order, toc_references};
pub use types::{DocumentRecord, ExampleRecord};

use std::path::Path;

/// Read a file as text, replacing invalid UTF-8 rather than failing.
pub(crate) fn read_lossy(path: &Path) -> crate::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name without its final extension, as a lossy string.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
