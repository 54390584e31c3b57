use std::path::PathBuf;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading, mutating, or persisting a world document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document file does not exist.
    #[error("world file not found at {}", .0.display())]
    NotFound(PathBuf),

    /// The document file is not well-formed, or its root is not an object.
    #[error("malformed world file {}: {message}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A write outside the gated namespace was attempted.
    #[error("write denied: {0}")]
    PermissionDenied(String),

    /// A dotted path was empty or contained an empty segment.
    #[error("invalid path: \"{0}\"")]
    InvalidPath(String),

    /// A strict write would have overwritten a non-object intermediate.
    #[error("path conflict at \"{0}\": not an object")]
    PathConflict(String),

    /// An operation needed a loaded document but none is loaded.
    #[error("no world document loaded")]
    NotLoaded,

    /// The persistence medium failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this error is a missing-resource outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error came from the persistence medium and may be retried.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
