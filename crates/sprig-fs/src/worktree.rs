//! Working directory access.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::path::validate_path;
use crate::store::ContentHandle;
use crate::traits::{ContentStore, WorkingTree};

/// Working tree rooted at the repository directory.
///
/// Snapshots are resolved through the borrowed content store, so a write
/// copies the stored bytes into place.
#[derive(Debug)]
pub struct Worktree<'a, C: ContentStore> {
    root: PathBuf,
    store: &'a C,
}

impl<'a, C: ContentStore> Worktree<'a, C> {
    /// Create a working tree rooted at `root` that resolves handles via `store`.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, store: &'a C) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            store,
        }
    }

    /// Get the repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_path(path)?))
    }
}

impl<C: ContentStore> WorkingTree for Worktree<'_, C> {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.full_path(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if full.is_dir() => {
                tracing::debug!(path, error = %e, "path is a directory");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, path: &str, handle: &ContentHandle) -> Result<()> {
        let full = self.full_path(path)?;
        let bytes = self.store.read(handle)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, bytes)?;
        tracing::debug!(path, %handle, "restored file");
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let full = self.full_path(path)?;
        match fs::remove_file(&full) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
