//! Restoring snapshots into the working tree.
//!
//! Restores only ever write files. Paths tracked by the previous head but
//! absent from the restored commit are left on disk.

use sprig_fs::{WorkingTree, validate_path};

use crate::commit::{Commit, CommitId};
use crate::error::{Error, Result};
use crate::graph::CommitGraph;

/// Write every file of `commit` into the working tree.
///
/// # Errors
/// Propagates working tree failures.
pub fn restore_commit<W: WorkingTree>(tree: &W, commit: &Commit) -> Result<()> {
    for (path, handle) in &commit.files {
        tree.write(path, handle)?;
    }
    tracing::debug!(commit = %commit.id, files = commit.files.len(), "restored commit");
    Ok(())
}

/// Write one file of `commit` into the working tree.
///
/// # Errors
/// Returns [`Error::FileNotFoundInCommit`] if the commit does not track
/// `path`.
pub fn restore_file<W: WorkingTree>(tree: &W, commit: &Commit, path: &str) -> Result<()> {
    let handle = commit.file(path).ok_or_else(|| Error::FileNotFoundInCommit {
        commit: commit.id,
        path: path.to_string(),
    })?;
    tree.write(path, handle)?;
    Ok(())
}

/// Switch to `branch` and restore its head.
///
/// Returns `false` when `branch` was already checked out; its files are
/// restored all the same.
///
/// # Errors
/// Returns [`Error::BranchNotFound`] for an unknown branch.
pub fn checkout_branch<W: WorkingTree>(
    graph: &mut CommitGraph,
    tree: &W,
    branch: &str,
) -> Result<bool> {
    let head = graph.branch_head(branch)?;
    restore_commit(tree, graph.commit(head)?)?;

    let switched = graph.current_branch() != branch;
    graph.switch_branch(branch)?;
    tracing::info!(branch, head = %head, "checked out branch");
    Ok(switched)
}

/// Restore `path` from `commit`, or from the head when `commit` is `None`.
/// `path` is looked up in its canonical form.
///
/// # Errors
/// Returns [`Error::CommitNotFound`] or [`Error::FileNotFoundInCommit`].
pub fn checkout_file<W: WorkingTree>(
    graph: &CommitGraph,
    tree: &W,
    commit: Option<CommitId>,
    path: &str,
) -> Result<()> {
    let commit = graph.commit(commit.unwrap_or_else(|| graph.head()))?;
    restore_file(tree, commit, &validate_path(path)?)
}

/// Restore every file of `id` and move the current branch to it.
///
/// # Errors
/// Returns [`Error::CommitNotFound`] for an unknown id.
pub fn reset<W: WorkingTree>(graph: &mut CommitGraph, tree: &W, id: CommitId) -> Result<()> {
    restore_commit(tree, graph.commit(id)?)?;
    graph.reset_pointer(id)
}
