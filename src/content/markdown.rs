//! Title/description heuristics for guide pages.
//!
//! A single forward scan over trimmed lines:
//! - a line starting with `@` opens a directive block that swallows every
//!   line up to a lone `}`
//! - blank lines are skipped
//! - until a `# ` heading is seen, lines only matter as title candidates
//! - after the title, lines starting with `#`, `<` or `>` are structural
//! - the first remaining line is the description

use std::path::Path;

use super::types::DocumentRecord;
use crate::error::Result;

/// Description used when a page has no qualifying prose line.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Title and description of a markdown page.
///
/// `fallback_title` is used when the page has no level-1 heading.
#[must_use]
pub fn document_metadata_from_str(content: &str, fallback_title: &str) -> (String, String) {
    let mut title = fallback_title.to_string();
    let mut description = None;

    let mut in_directive = false;
    let mut found_title = false;

    for line in content.lines() {
        let stripped = line.trim();

        if stripped.starts_with('@') {
            in_directive = true;
            continue;
        }

        if in_directive {
            if stripped == "}" {
                in_directive = false;
            }
            continue;
        }

        if stripped.is_empty() {
            continue;
        }

        if !found_title {
            if let Some(heading) = stripped.strip_prefix("# ") {
                title = heading.trim().to_string();
                found_title = true;
            }
            continue;
        }

        if stripped.starts_with(['#', '<', '>']) {
            continue;
        }

        description = Some(stripped.to_string());
        break;
    }

    (
        title,
        description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
    )
}

/// Extract a [`DocumentRecord`] from a markdown file.
///
/// Only I/O errors are reported; content problems fall back to defaults.
pub fn extract_metadata(file_path: &Path) -> Result<DocumentRecord> {
    let content = super::read_lossy(file_path)?;
    let (title, description) = document_metadata_from_str(&content, &super::file_stem(file_path));

    Ok(DocumentRecord {
        filename: file_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        title,
        description,
        source_path: file_path.to_path_buf(),
    })
}
