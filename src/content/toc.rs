//! Table-of-contents parsing.
//!
//! The TOC orders the guide through `<doc:TOKEN>` references. Any occurrence
//! counts, whatever markup surrounds it.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PackagerError, Result};

static DOC_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<doc:([^>]+)>").expect("doc reference pattern is valid"));

/// Reference tokens in order of appearance, duplicates included.
#[must_use]
pub fn toc_references(content: &str) -> Vec<String> {
    DOC_REFERENCE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Read the TOC at `toc_path` and return its reference tokens in order.
pub fn parse_toc_order(toc_path: &Path) -> Result<Vec<String>> {
    if !toc_path.is_file() {
        return Err(PackagerError::TocNotFound {
            path: toc_path.to_path_buf(),
        });
    }

    let content = super::read_lossy(toc_path)?;
    Ok(toc_references(&content))
}
