//! Commit records.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprig_fs::ContentHandle;

/// Globally unique commit number, strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(u64);

impl CommitId {
    /// Id of the root commit created at init.
    pub const ROOT: Self = Self(0);

    /// Wrap a raw commit number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw commit number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Mapping from logical file path to its stored snapshot.
pub type FileTable = BTreeMap<String, ContentHandle>;

/// An immutable snapshot of the tracked files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit number.
    pub id: CommitId,

    /// Commit message.
    pub message: String,

    /// When the commit was created.
    pub timestamp: DateTime<Utc>,

    /// Parent commit (`None` only for the root).
    pub parent: Option<CommitId>,

    /// Tracked files.
    #[serde(default)]
    pub files: FileTable,
}

impl Commit {
    /// Create a commit stamped with the current time.
    #[must_use]
    pub fn new(
        id: CommitId,
        message: impl Into<String>,
        parent: Option<CommitId>,
        files: FileTable,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            timestamp: Utc::now(),
            parent,
            files,
        }
    }

    /// Look up the snapshot of `path`.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&ContentHandle> {
        self.files.get(path)
    }

    /// Check whether the commit tracks `path`.
    #[must_use]
    pub fn tracks(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Check whether this is the root commit.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
