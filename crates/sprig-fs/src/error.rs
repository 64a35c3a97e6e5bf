//! Error types for sprig-fs.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while touching the content store or working tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A content handle points at a blob that no longer exists.
    #[error("missing blob for handle {0}")]
    MissingBlob(String),

    /// A path is absolute, empty, or escapes the repository root.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
