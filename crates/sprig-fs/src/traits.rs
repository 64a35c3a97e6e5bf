//! Trait abstractions for storage collaborators.
//!
//! The engines never touch the filesystem directly; they go through
//! these traits so tests can substitute in-memory implementations.

use crate::Result;
use crate::store::ContentHandle;

/// Storage for file snapshots.
///
/// Handles are opaque to callers: only the store that produced a handle
/// knows how to resolve it.
#[allow(clippy::missing_errors_doc)]
pub trait ContentStore {
    /// Persist `bytes` as the snapshot of `path` and return its handle.
    fn store(&self, path: &str, bytes: &[u8]) -> Result<ContentHandle>;

    /// Read back the bytes behind a handle.
    fn read(&self, handle: &ContentHandle) -> Result<Vec<u8>>;

    /// Byte-exact comparison of two stored snapshots.
    fn equal(&self, a: &ContentHandle, b: &ContentHandle) -> Result<bool> {
        if a == b {
            return Ok(true);
        }
        Ok(self.read(a)? == self.read(b)?)
    }
}

/// The user's checkout.
#[allow(clippy::missing_errors_doc)]
pub trait WorkingTree {
    /// Read a file, returning `None` if it does not exist.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite `path` with the snapshot behind `handle`.
    fn write(&self, path: &str, handle: &ContentHandle) -> Result<()>;

    /// Delete `path`. Deleting a missing file is not an error.
    fn delete(&self, path: &str) -> Result<()>;
}
