//! Mock implementations for testing services.
//!
//! These mocks implement the traits from sprig-core and sprig-fs to enable
//! unit testing of service logic without touching the filesystem.

#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sprig_core::config::Config;
use sprig_core::{BranchName, CommitGraph, Error, Result as CoreResult, StateStore};
use sprig_fs::{ContentHandle, ContentStore, Result as FsResult, WorkingTree};

/// Mock implementation of `StateStore` holding the graph in memory.
pub struct MockStateStore {
    graph: RefCell<Option<CommitGraph>>,
    config: RefCell<Config>,
    saves: Cell<usize>,
    sprig_dir: PathBuf,
}

impl Default for MockStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStateStore {
    /// An initialized repository on `master` with only the root commit.
    pub fn new() -> Self {
        let graph = CommitGraph::new(BranchName::new("master").unwrap());
        Self {
            graph: RefCell::new(Some(graph)),
            config: RefCell::new(Config::default()),
            saves: Cell::new(0),
            sprig_dir: PathBuf::from("/tmp/mock-repo/.sprig"),
        }
    }

    pub fn uninitialized() -> Self {
        let state = Self::new();
        *state.graph.borrow_mut() = None;
        state
    }

    /// Snapshot of the persisted graph.
    pub fn graph(&self) -> CommitGraph {
        self.graph
            .borrow()
            .clone()
            .unwrap_or_else(|| panic!("mock repository not initialized"))
    }

    /// Replace the persisted graph without counting a save.
    pub fn set_graph(&self, graph: CommitGraph) {
        *self.graph.borrow_mut() = Some(graph);
    }

    /// Number of successful `save_graph` calls.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl StateStore for MockStateStore {
    fn is_initialized(&self) -> bool {
        self.graph.borrow().is_some()
    }

    fn init(&self, graph: &CommitGraph) -> CoreResult<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(self.sprig_dir.clone()));
        }
        *self.graph.borrow_mut() = Some(graph.clone());
        Ok(())
    }

    fn sprig_dir(&self) -> &Path {
        &self.sprig_dir
    }

    fn load_graph(&self) -> CoreResult<CommitGraph> {
        self.graph.borrow().clone().ok_or(Error::NotInitialized)
    }

    fn save_graph(&self, graph: &CommitGraph) -> CoreResult<()> {
        *self.graph.borrow_mut() = Some(graph.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load_config(&self) -> CoreResult<Config> {
        Ok(self.config.borrow().clone())
    }

    fn save_config(&self, config: &Config) -> CoreResult<()> {
        *self.config.borrow_mut() = config.clone();
        Ok(())
    }
}

/// In-memory content store and working tree.
#[derive(Default)]
pub struct MemoryFs {
    blobs: RefCell<Vec<Vec<u8>>>,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    fail_writes: Cell<bool>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file straight into the working tree.
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.put_file(path, contents);
        self
    }

    pub fn put_file(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.as_bytes().to_vec());
    }

    /// Working-tree contents at `path`, as text.
    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Make every subsequent working-tree write fail.
    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }
}

impl ContentStore for MemoryFs {
    fn store(&self, path: &str, bytes: &[u8]) -> FsResult<ContentHandle> {
        let mut blobs = self.blobs.borrow_mut();
        blobs.push(bytes.to_vec());
        Ok(ContentHandle::new(format!("{:06}/{path}", blobs.len() - 1)))
    }

    fn read(&self, handle: &ContentHandle) -> FsResult<Vec<u8>> {
        handle
            .as_str()
            .split_once('/')
            .and_then(|(slot, _)| slot.parse::<usize>().ok())
            .and_then(|slot| self.blobs.borrow().get(slot).cloned())
            .ok_or_else(|| sprig_fs::Error::MissingBlob(handle.to_string()))
    }
}

impl WorkingTree for MemoryFs {
    fn read(&self, path: &str) -> FsResult<Option<Vec<u8>>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &str, handle: &ContentHandle) -> FsResult<()> {
        if self.fail_writes.get() {
            return Err(std::io::Error::other("disk full").into());
        }
        let bytes = ContentStore::read(self, handle)?;
        self.files.borrow_mut().insert(path.to_string(), bytes);
        Ok(())
    }

    fn delete(&self, path: &str) -> FsResult<()> {
        self.files.borrow_mut().remove(path);
        Ok(())
    }
}
