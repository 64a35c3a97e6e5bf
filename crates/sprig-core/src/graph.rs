//! The commit graph: every commit ever made, the branch pointers, and the
//! staging area for the next commit.
//!
//! Commits live in a flat arena keyed by [`CommitId`]; parent links are ids,
//! never references, so the graph serializes as plain maps.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::BranchName;
use crate::commit::{Commit, CommitId, FileTable};
use crate::error::{Error, Result};

/// Message of the root commit created at init.
pub const INITIAL_MESSAGE: &str = "initial commit";

/// In-memory repository state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGraph {
    commits: BTreeMap<CommitId, Commit>,
    branches: BTreeMap<BranchName, CommitId>,
    current_branch: BranchName,
    head: CommitId,
    #[serde(default)]
    staged: BTreeSet<String>,
    #[serde(default)]
    marked_for_removal: BTreeSet<String>,
    /// Id of the most recently created commit.
    last_id: CommitId,
}

impl CommitGraph {
    /// Create a graph holding only the root commit, checked out on `branch`.
    #[must_use]
    pub fn new(branch: BranchName) -> Self {
        let root = Commit::new(CommitId::ROOT, INITIAL_MESSAGE, None, FileTable::new());
        let mut commits = BTreeMap::new();
        commits.insert(root.id, root);

        let mut branches = BTreeMap::new();
        branches.insert(branch.clone(), CommitId::ROOT);

        Self {
            commits,
            branches,
            current_branch: branch,
            head: CommitId::ROOT,
            staged: BTreeSet::new(),
            marked_for_removal: BTreeSet::new(),
            last_id: CommitId::ROOT,
        }
    }

    // === Queries ===

    /// Name of the checked-out branch.
    #[must_use]
    pub const fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    /// Commit the checked-out branch points to.
    #[must_use]
    pub const fn head(&self) -> CommitId {
        self.head
    }

    /// The head commit record.
    ///
    /// # Errors
    /// Returns [`Error::CommitNotFound`] if the persisted graph is corrupt.
    pub fn head_commit(&self) -> Result<&Commit> {
        self.commit(self.head)
    }

    /// Look up a commit by id.
    ///
    /// # Errors
    /// Returns [`Error::CommitNotFound`] if no commit has that id.
    pub fn commit(&self, id: CommitId) -> Result<&Commit> {
        self.commits.get(&id).ok_or(Error::CommitNotFound(id))
    }

    /// Check whether a commit with this id exists.
    #[must_use]
    pub fn contains(&self, id: CommitId) -> bool {
        self.commits.contains_key(&id)
    }

    /// All commits in ascending id order.
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.values()
    }

    /// Number of commits ever created, the root included.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Id of the most recently created commit.
    #[must_use]
    pub const fn last_id(&self) -> CommitId {
        self.last_id
    }

    /// Branch names and the commits they point to, sorted by name.
    pub fn branches(&self) -> impl Iterator<Item = (&BranchName, CommitId)> {
        self.branches.iter().map(|(name, id)| (name, *id))
    }

    /// Check whether a branch exists.
    #[must_use]
    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Head commit of the named branch.
    ///
    /// # Errors
    /// Returns [`Error::BranchNotFound`] if there is no such branch.
    pub fn branch_head(&self, name: &str) -> Result<CommitId> {
        self.branches
            .get(name)
            .copied()
            .ok_or_else(|| Error::BranchNotFound(name.to_string()))
    }

    /// Paths queued for the next commit.
    #[must_use]
    pub const fn staged(&self) -> &BTreeSet<String> {
        &self.staged
    }

    /// Paths queued for deletion in the next commit.
    #[must_use]
    pub const fn marked_for_removal(&self) -> &BTreeSet<String> {
        &self.marked_for_removal
    }

    /// Ids of every commit whose message is exactly `message`, ascending.
    #[must_use]
    pub fn find_by_message(&self, message: &str) -> Vec<CommitId> {
        self.commits
            .values()
            .filter(|c| c.message == message)
            .map(|c| c.id)
            .collect()
    }

    /// Check the invariants a graph read from disk must hold.
    ///
    /// Every commit is stored under its own id, no id exceeds `last_id`,
    /// every parent exists and is older than its child, every branch points
    /// at a known commit, and `head` matches the current branch's entry.
    ///
    /// # Errors
    /// Returns a description of the first violation found.
    pub fn check(&self) -> std::result::Result<(), String> {
        for (id, commit) in &self.commits {
            if commit.id != *id {
                return Err(format!("commit {} is stored under id {id}", commit.id));
            }
            if *id > self.last_id {
                return Err(format!("commit {id} is newer than last_id {}", self.last_id));
            }
            if let Some(parent) = commit.parent {
                if parent >= *id || !self.commits.contains_key(&parent) {
                    return Err(format!("commit {id} has invalid parent {parent}"));
                }
            }
        }

        if let Some((name, id)) = self.branches.iter().find(|(_, id)| !self.contains(**id)) {
            return Err(format!("branch '{name}' points at missing commit {id}"));
        }

        match self.branches.get(&self.current_branch) {
            None => Err(format!("current branch '{}' does not exist", self.current_branch)),
            Some(id) if *id != self.head => Err(format!(
                "head {} does not match branch '{}' at {id}",
                self.head, self.current_branch
            )),
            Some(_) => Ok(()),
        }
    }

    // === Commits ===

    /// Reserve the next commit id.
    pub(crate) fn allocate_id(&mut self) -> CommitId {
        self.last_id = self.last_id.next();
        self.last_id
    }

    /// Create a commit as a child of the current head and advance the
    /// current branch to it.
    ///
    /// The staging area is left alone; see [`Self::clear_staging`].
    pub fn add_commit(&mut self, message: impl Into<String>, files: FileTable) -> CommitId {
        let id = self.allocate_id();
        let commit = Commit::new(id, message, Some(self.head), files);
        self.commits.insert(id, commit);
        self.move_head(id);
        id
    }

    /// Point the current branch at `id`, keeping `head` and the branch map in
    /// step.
    fn move_head(&mut self, id: CommitId) {
        self.head = id;
        self.branches.insert(self.current_branch.clone(), id);
    }

    /// Forcibly move the current branch's head to an existing commit.
    ///
    /// # Errors
    /// Returns [`Error::CommitNotFound`] if `id` is unknown.
    pub fn reset_pointer(&mut self, id: CommitId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::CommitNotFound(id));
        }
        self.move_head(id);
        Ok(())
    }

    // === Branches ===

    /// Bind `name` to the current head.
    ///
    /// # Errors
    /// Returns [`Error::BranchAlreadyExists`] if `name` is taken.
    pub fn create_branch(&mut self, name: BranchName) -> Result<()> {
        if self.branches.contains_key(&name) {
            return Err(Error::BranchAlreadyExists(name.to_string()));
        }
        tracing::debug!(branch = %name, head = %self.head, "created branch");
        self.branches.insert(name, self.head);
        Ok(())
    }

    /// Make `name` the current branch.
    ///
    /// # Errors
    /// Returns [`Error::BranchNotFound`] if there is no such branch.
    pub fn switch_branch(&mut self, name: &str) -> Result<()> {
        let (name, head) = self
            .branches
            .get_key_value(name)
            .map(|(n, id)| (n.clone(), *id))
            .ok_or_else(|| Error::BranchNotFound(name.to_string()))?;

        self.branches.insert(self.current_branch.clone(), self.head);
        self.current_branch = name;
        self.head = head;
        Ok(())
    }

    /// Delete a branch pointer. Its commits stay in the graph.
    ///
    /// # Errors
    /// Returns [`Error::CannotRemoveCurrentBranch`] for the checked-out
    /// branch and [`Error::BranchNotFound`] for an unknown one.
    pub fn remove_branch(&mut self, name: &str) -> Result<()> {
        if self.current_branch == name {
            return Err(Error::CannotRemoveCurrentBranch(name.to_string()));
        }
        self.branches
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::BranchNotFound(name.to_string()))
    }

    // === Staging ===

    /// Queue `path` for the next commit.
    pub fn stage_file(&mut self, path: &str) {
        if !self.staged.contains(path) {
            self.staged.insert(path.to_string());
        }
    }

    /// Drop `path` from the staging set.
    pub fn unstage_file(&mut self, path: &str) {
        self.staged.remove(path);
    }

    /// Queue `path` for deletion in the next commit.
    pub fn mark_removal(&mut self, path: &str) {
        if !self.marked_for_removal.contains(path) {
            self.marked_for_removal.insert(path.to_string());
        }
    }

    /// Drop `path` from the removal set.
    pub fn unmark_removal(&mut self, path: &str) {
        self.marked_for_removal.remove(path);
    }

    /// Empty both the staging and the removal set.
    pub fn clear_staging(&mut self) {
        self.staged.clear();
        self.marked_for_removal.clear();
    }

    // === Replay support ===

    /// Append an already-built commit to the current branch, re-linking it
    /// to the current head.
    pub(crate) fn push_replayed(&mut self, mut commit: Commit) -> CommitId {
        commit.parent = Some(self.head);
        let id = commit.id;
        self.commits.insert(id, commit);
        self.move_head(id);
        id
    }

    /// Move the current branch pointer without touching the working tree.
    pub(crate) fn point_current_at(&mut self, id: CommitId) {
        self.move_head(id);
    }
}
