//! Description heuristics for example source files.

use std::path::Path;

use super::types::ExampleRecord;
use crate::config::SanitizeConfig;
use crate::error::Result;

/// Character substitution applied to destination file names.
///
/// Keys never appear among the replacements, so applying it twice is the
/// same as applying it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameSanitizer {
    substitutions: Vec<(char, char)>,
}

impl FilenameSanitizer {
    pub fn from_config(config: &SanitizeConfig) -> Result<Self> {
        Ok(Self {
            substitutions: config.substitution_pairs()?,
        })
    }

    #[must_use]
    pub fn sanitize(&self, filename: &str) -> String {
        filename
            .chars()
            .map(|c| {
                self.substitutions
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map_or(c, |(_, to)| *to)
            })
            .collect()
    }
}

impl Default for FilenameSanitizer {
    fn default() -> Self {
        Self {
            substitutions: vec![('+', '_')],
        }
    }
}

/// Description of an example from its leading comment, if it has one.
///
/// Blank lines and block-comment lines (`/*`, `*`) are passed over. A `///`
/// line ends the scan, yielding its text unless that is empty. A `//` line
/// wins unless it is empty, a `MARK:` label or a `===` separator, in which
/// case scanning moves on. Any other line is code and ends the scan.
#[must_use]
pub fn leading_comment_description(content: &str) -> Option<String> {
    for line in content.lines() {
        let stripped = line.trim();

        if stripped.is_empty() {
            continue;
        }

        if let Some(doc) = stripped.strip_prefix("///") {
            let doc = doc.trim();
            return (!doc.is_empty()).then(|| doc.to_string());
        }

        if let Some(comment) = stripped.strip_prefix("//") {
            let comment = comment.trim();
            if !comment.is_empty() && !comment.starts_with("MARK:") && !comment.starts_with("===") {
                return Some(comment.to_string());
            }
            continue;
        }

        if stripped.starts_with("/*") || stripped.starts_with('*') {
            continue;
        }

        break;
    }

    None
}

/// Description synthesized from a file stem: `Foo_Bar+Baz` becomes
/// "Example code demonstrating Foo Bar Baz."
#[must_use]
pub fn fallback_description(stem: &str) -> String {
    let name = stem.replace(['_', '+'], " ");
    format!("Example code demonstrating {name}.")
}

/// Sanitized file name and description of an example given its text.
#[must_use]
pub fn example_metadata_from_str(
    content: &str,
    filename: &str,
    sanitizer: &FilenameSanitizer,
) -> (String, String) {
    let description = leading_comment_description(content).unwrap_or_else(|| {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        fallback_description(&stem)
    });

    (sanitizer.sanitize(filename), description)
}

/// Extract an [`ExampleRecord`] from a source file.
///
/// Only I/O errors are reported; content problems fall back to defaults.
pub fn extract_example_metadata(
    file_path: &Path,
    sanitizer: &FilenameSanitizer,
) -> Result<ExampleRecord> {
    let content = super::read_lossy(file_path)?;
    let filename = file_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (filename, description) = example_metadata_from_str(&content, &filename, sanitizer);

    Ok(ExampleRecord {
        filename,
        description,
        source_path: file_path.to_path_buf(),
    })
}
