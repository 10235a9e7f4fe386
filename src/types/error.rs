//! Unified Error Type System
//!
//! Centralized error type for the whole crate.
//!
//! Per-file problems (unreadable sources, failed writes, failed renames) are
//! collected into command outcomes and never abort a run. Only setup errors
//! such as an invalid project root or a malformed config travel up to `main`.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid project root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from} -> {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

pub type Result<T> = std::result::Result<T, DocError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl DocError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| DocError::Config(format!("{}: {}", context.into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_display() {
        let err = DocError::write(
            "docs/a.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write docs/a.md: denied");
    }

    #[test]
    fn test_invalid_root_display() {
        let err = DocError::invalid_root("/nope", "does not exist");
        assert_eq!(err.to_string(), "Invalid project root /nope: does not exist");
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = res.with_context("loading config").unwrap_err();
        assert_eq!(err.to_string(), "Config error: loading config: boom");
    }
}
