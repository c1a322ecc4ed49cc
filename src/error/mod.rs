//! Error handling for skill-packager.
//!
//! This module provides:
//! - [`PackagerError`]: The main error enum for all packaging operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Serializable error with suggestion and context

mod codes;

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for packaging operations.
#[derive(Error, Debug)]
pub enum PackagerError {
    #[error("Git command not found. Please ensure git is installed.")]
    GitUnavailable,

    #[error("Failed to clone repository: {0}")]
    CloneFailed(String),

    #[error("TOC file not found: {}", .path.display())]
    TocNotFound { path: PathBuf },

    #[error("No documentation files found. Expected structure may have changed.")]
    NoDocuments,

    #[error("No license file found in repository root (looked for {}). Required for packaging.", .candidates.join(", "))]
    LicenseNotFound { candidates: Vec<String> },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PackagerError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::GitUnavailable => ErrorCode::GitUnavailable,
            Self::CloneFailed(_) => ErrorCode::CloneFailed,
            Self::TocNotFound { .. } => ErrorCode::TocNotFound,
            Self::NoDocuments => ErrorCode::NoDocuments,
            Self::LicenseNotFound { .. } => ErrorCode::LicenseNotFound,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Io(_) | Self::Walk(_) => ErrorCode::IoError,
            Self::Archive(_) => ErrorCode::ArchiveError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::TocNotFound { path } => {
                Some(serde_json::json!({ "toc_path": path.display().to_string() }))
            }
            Self::LicenseNotFound { candidates } => {
                Some(serde_json::json!({ "candidates": candidates }))
            }
            Self::CloneFailed(stderr) => Some(serde_json::json!({ "stderr": stderr })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_packager_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "TOC_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 201)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "environment", "structure")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a `PackagerError`.
    #[must_use]
    pub fn from_packager_error(err: &PackagerError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&PackagerError> for StructuredError {
    fn from(err: &PackagerError) -> Self {
        Self::from_packager_error(err)
    }
}

/// Result type alias using `PackagerError`.
pub type Result<T> = std::result::Result<T, PackagerError>;
