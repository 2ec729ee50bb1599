//! Error types for Helpdeck.
//!
//! Library crates use [`HelpdeckError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Helpdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum HelpdeckError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the help content service.
    #[error("network error: {0}")]
    Network(String),

    /// The service rejected an update because the optimistic-lock token
    /// (`modification_count`) was stale.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Data validation error (item key length, missing owner key, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A help article's base/resource/context fields could not be combined
    /// into a parseable URL.
    #[error("url construction error: {0}")]
    UrlConstruction(String),

    /// Filesystem I/O error (import/export files, config).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON (de)serialization error for import/export payloads.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HelpdeckError>;

impl HelpdeckError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a conflict error from any displayable message.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict {
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
