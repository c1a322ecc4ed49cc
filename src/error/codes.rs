//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Environment errors (git tooling, clone)
//! - 2xx: Source structure errors (TOC, documents, license)
//! - 3xx: Config errors
//! - 6xx: Storage errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `GitUnavailable` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Environment errors (1xx)
    // ========================================
    /// E101: The git executable could not be found
    GitUnavailable,
    /// E102: Cloning the source repository failed
    CloneFailed,

    // ========================================
    // Structure errors (2xx)
    // ========================================
    /// E201: The table-of-contents file is missing
    TocNotFound,
    /// E202: No TOC reference resolved to a document
    NoDocuments,
    /// E203: The repository root carries no recognised license file
    LicenseNotFound,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E605: Serialization/deserialization failed
    SerializationError,
    /// E606: Writing the zip archive failed
    ArchiveError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal error
    InternalError,
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `GitUnavailable` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::GitUnavailable => 101,
            Self::CloneFailed => 102,

            Self::TocNotFound => 201,
            Self::NoDocuments => 202,
            Self::LicenseNotFound => 203,

            Self::ConfigInvalid => 302,

            Self::SerializationError => 605,
            Self::ArchiveError => 606,

            Self::InternalError => 901,
            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::GitUnavailable => "Install git and make sure it is on PATH, or pass --source-dir <checkout>",
            Self::CloneFailed => "Check network access and the repository URL (source.repo_url / SKILL_PACKAGER_REPO_URL)",
            Self::TocNotFound => "Check source.guide_dir and source.toc_file; the repository layout may have changed",
            Self::NoDocuments => "The TOC references no markdown files in the guide directory; the repository layout may have changed",
            Self::LicenseNotFound => "Add one of the configured license files to the repository root (source.license_files)",
            Self::ConfigInvalid => "Check TOML syntax and values in the config file",
            Self::SerializationError => "Report this as a bug",
            Self::ArchiveError => "Check free disk space and write permissions next to the output directory",
            Self::InternalError => "Report this as a bug",
            Self::IoError => "Check file permissions and that the paths exist",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::GitUnavailable
            | Self::CloneFailed
            | Self::ConfigInvalid
            | Self::ArchiveError
            | Self::IoError => true,

            Self::TocNotFound
            | Self::NoDocuments
            | Self::LicenseNotFound
            | Self::SerializationError
            | Self::InternalError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "environment",
            2 => "structure",
            3 => "config",
            6 => "storage",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::GitUnavailable,
            Self::CloneFailed,
            Self::TocNotFound,
            Self::NoDocuments,
            Self::LicenseNotFound,
            Self::ConfigInvalid,
            Self::SerializationError,
            Self::ArchiveError,
            Self::InternalError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
