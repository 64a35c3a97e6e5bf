//! Error types for sprig-core.

use std::path::PathBuf;

use crate::commit::CommitId;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sprig-core operations.
///
/// Every variant except [`Error::Storage`], [`Error::Io`], [`Error::Json`]
/// and [`Error::Toml`] is detected before the commit graph is touched, so
/// a rejected operation leaves the graph exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The .sprig directory doesn't exist.
    #[error("not a sprig repository - run `sprig init` first")]
    NotInitialized,

    /// The .sprig directory already exists.
    #[error("a sprig repository already exists in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// Branch not found.
    #[error("a branch named '{0}' does not exist")]
    BranchNotFound(String),

    /// Branch already exists.
    #[error("a branch named '{0}' already exists")]
    BranchAlreadyExists(String),

    /// Invalid branch name.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The invalid name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// No commit with the given id.
    #[error("no commit with id {0} exists")]
    CommitNotFound(CommitId),

    /// The commit does not track the requested path.
    #[error("'{path}' does not exist in commit {commit}")]
    FileNotFoundInCommit { commit: CommitId, path: String },

    /// The working tree has no file at the requested path.
    #[error("'{0}' does not exist in the working tree")]
    FileNotFound(String),

    /// The file matches the version in the current head.
    #[error("'{0}' has not been modified since the last commit")]
    FileUnchanged(String),

    /// The file is neither staged nor tracked.
    #[error("no reason to remove '{0}': it is neither staged nor tracked")]
    NothingToRemove(String),

    /// Nothing staged.
    #[error("no changes added to the commit")]
    NothingToCommit,

    /// Blank commit message.
    #[error("please enter a commit message")]
    EmptyMessage,

    /// Attempt to delete the checked-out branch.
    #[error("cannot remove the current branch '{0}'")]
    CannotRemoveCurrentBranch(String),

    /// Attempt to merge a branch into itself.
    #[error("cannot merge a branch with itself")]
    CannotMergeSelf,

    /// Attempt to rebase a branch onto itself.
    #[error("cannot rebase a branch onto itself")]
    CannotRebaseOntoSelf,

    /// The target branch is already part of the current history.
    #[error("already up-to-date")]
    AlreadyUpToDate,

    /// The two heads share no ancestor.
    #[error("commits {0} and {1} have no common ancestor")]
    NoCommonAncestor(CommitId, CommitId),

    /// The interactive decision source gave up.
    #[error("rebase aborted: {0}")]
    RebaseAborted(String),

    /// State file parsing error.
    #[error("failed to parse {}: {message}", file.display())]
    StateParseError { file: PathBuf, message: String },

    /// Content store or working tree failure. Always fatal for the
    /// enclosing operation.
    #[error("storage error: {0}")]
    Storage(#[from] sprig_fs::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
