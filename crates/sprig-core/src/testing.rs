//! In-memory collaborators for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use sprig_fs::{ContentHandle, ContentStore, WorkingTree};

use crate::commit::FileTable;

/// Content store and working tree held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<Vec<Vec<u8>>>,
    worktree: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn contents(&self, handle: &ContentHandle) -> Vec<u8> {
        ContentStore::read(self, handle).unwrap_or_default()
    }

    pub fn worktree_file(&self, path: &str) -> Option<Vec<u8>> {
        self.worktree.borrow().get(path).cloned()
    }
}

impl ContentStore for MemoryStore {
    fn store(&self, path: &str, bytes: &[u8]) -> sprig_fs::Result<ContentHandle> {
        let mut blobs = self.blobs.borrow_mut();
        blobs.push(bytes.to_vec());
        Ok(ContentHandle::new(format!("{}/{path}", blobs.len() - 1)))
    }

    fn read(&self, handle: &ContentHandle) -> sprig_fs::Result<Vec<u8>> {
        handle
            .as_str()
            .split_once('/')
            .and_then(|(slot, _)| slot.parse::<usize>().ok())
            .and_then(|slot| self.blobs.borrow().get(slot).cloned())
            .ok_or_else(|| sprig_fs::Error::MissingBlob(handle.to_string()))
    }
}

impl WorkingTree for MemoryStore {
    fn read(&self, path: &str) -> sprig_fs::Result<Option<Vec<u8>>> {
        Ok(self.worktree_file(path))
    }

    fn write(&self, path: &str, handle: &ContentHandle) -> sprig_fs::Result<()> {
        let bytes = ContentStore::read(self, handle)?;
        self.worktree.borrow_mut().insert(path.to_string(), bytes);
        Ok(())
    }

    fn delete(&self, path: &str) -> sprig_fs::Result<()> {
        self.worktree.borrow_mut().remove(path);
        Ok(())
    }
}

/// Store each `(path, contents)` pair as a fresh blob and build a file table.
pub fn table(store: &MemoryStore, entries: &[(&str, &str)]) -> FileTable {
    entries
        .iter()
        .filter_map(|(path, contents)| {
            store
                .store(path, contents.as_bytes())
                .ok()
                .map(|handle| ((*path).to_string(), handle))
        })
        .collect()
}
