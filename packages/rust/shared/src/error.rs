//! Error types for docrank.
//!
//! Library crates use [`DocrankError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docrank operations.
#[derive(Debug, thiserror::Error)]
pub enum DocrankError {
    /// A raw record lacks one of the fields every document needs.
    #[error("record {record} is missing required field `{field}`")]
    MissingRequiredField { record: String, field: &'static str },

    /// The raw-record source could not be reached or read.
    #[error("content source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// Front matter or other content parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid argument or data (zero page size, unknown slug, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocrankError>;

impl DocrankError {
    /// Create a missing-field error for the record identified by `record`.
    pub fn missing_field(record: impl Into<String>, field: &'static str) -> Self {
        Self::MissingRequiredField {
            record: record.into(),
            field,
        }
    }

    /// Create a source-unavailable error from any displayable message.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
