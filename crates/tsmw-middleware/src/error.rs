//! Error types for the middleware.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for middleware operations.
pub type MiddlewareResult<T> = Result<T, MiddlewareError>;

/// Errors that escape a request.
///
/// Lookup misses and denied writes are not errors here: they are answered
/// with `[ERROR ...]` or `*_NONE` lines. What remains is the world file
/// itself being missing, malformed, or unwritable, and configuration trouble.
#[derive(Debug, Error)]
pub enum MiddlewareError {
    /// The world store failed.
    #[error("{0}")]
    Store(#[from] tsmw_core::StoreError),

    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid config {}: {message}", path.display())]
    ConfigParse {
        /// The config file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
}

impl MiddlewareError {
    /// Whether retrying the request might succeed (a medium failure).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_io())
    }
}
