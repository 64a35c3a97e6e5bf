//! On-disk content store.
//!
//! Every call to [`ContentStore::store`] allocates a new numbered slot under
//! the objects directory and writes the bytes there, keeping the original
//! path so the store stays browsable. There is no hashing and no
//! deduplication: two identical files stored twice occupy two slots.

use std::cell::Cell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::validate_path;
use crate::traits::ContentStore;

/// Opaque reference to a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    /// Wrap a raw handle string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content store rooted at a directory on disk.
#[derive(Debug)]
pub struct BlobStore {
    root: PathBuf,
    next_slot: Cell<u64>,
}

impl BlobStore {
    /// Open (or create) a store rooted at `root`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or read. Entries
    /// that are not numbered slots are ignored; hidden ones silently.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let mut next_slot = 0;
        for entry in fs::read_dir(&root)? {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            match name.parse::<u64>() {
                Ok(slot) => next_slot = next_slot.max(slot + 1),
                Err(_) if name.starts_with('.') => {}
                Err(_) => tracing::warn!(entry = %name, "ignoring foreign entry in object store"),
            }
        }

        Ok(Self {
            root,
            next_slot: Cell::new(next_slot),
        })
    }

    /// Get the path to the objects directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, handle: &ContentHandle) -> Result<PathBuf> {
        let raw = handle.as_str();
        validate_path(raw).map_err(|_| Error::MissingBlob(raw.to_string()))?;
        let path = self.root.join(raw);
        if !path.is_file() {
            return Err(Error::MissingBlob(raw.to_string()));
        }
        Ok(path)
    }
}

impl ContentStore for BlobStore {
    fn store(&self, path: &str, bytes: &[u8]) -> Result<ContentHandle> {
        let path = validate_path(path)?;

        let slot = self.next_slot.get();
        let relative = format!("{slot:06}/{path}");
        let target = self.root.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, bytes)?;
        self.next_slot.set(slot + 1);

        tracing::debug!(%path, handle = %relative, "stored blob");
        Ok(ContentHandle(relative))
    }

    fn read(&self, handle: &ContentHandle) -> Result<Vec<u8>> {
        let path = self.resolve(handle)?;
        Ok(fs::read(path)?)
    }
}
