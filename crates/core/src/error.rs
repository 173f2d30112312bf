//! Error types for the Memory Bank hook.
//!
//! Uses `thiserror` for ergonomic error definitions. [`InputError`] and
//! [`FileError`] never reach the host: every read site turns them into
//! "absent" and logs them. [`Error`] covers what a command can still fail
//! on once the context is built, which is writing it out.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for hook operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with the JSON payload the host writes to stdin.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("Failed to read hook input: {0}")]
    Read(String),

    #[error("Hook input is not valid JSON: {0}")]
    Parse(String),

    #[error("Hook input must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}
