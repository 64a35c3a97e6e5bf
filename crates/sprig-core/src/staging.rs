//! Staging area operations: add, rm and commit.

use sprig_fs::{ContentStore, WorkingTree, validate_path};

use crate::commit::CommitId;
use crate::error::{Error, Result};
use crate::graph::CommitGraph;

/// Queue a working-tree file for the next commit under its canonical path.
///
/// # Errors
/// Returns [`Error::FileNotFound`] if the working tree has no such file and
/// [`Error::FileUnchanged`] if it matches the head's snapshot byte for byte.
pub fn add<C: ContentStore, W: WorkingTree>(
    graph: &mut CommitGraph,
    store: &C,
    tree: &W,
    path: &str,
) -> Result<()> {
    let path = validate_path(path)?;
    let bytes = tree
        .read(&path)?
        .ok_or_else(|| Error::FileNotFound(path.clone()))?;

    if let Some(handle) = graph.head_commit()?.file(&path) {
        if store.read(handle)? == bytes {
            return Err(Error::FileUnchanged(path));
        }
    }

    graph.stage_file(&path);
    graph.unmark_removal(&path);
    tracing::debug!(%path, "staged");
    Ok(())
}

/// Unstage a path and mark it for removal from the next commit.
///
/// # Errors
/// Returns [`Error::NothingToRemove`] if the path is neither staged nor
/// tracked by the head.
pub fn remove(graph: &mut CommitGraph, path: &str) -> Result<()> {
    let path = validate_path(path)?;
    let tracked = graph.head_commit()?.tracks(&path);
    if !tracked && !graph.staged().contains(&path) {
        return Err(Error::NothingToRemove(path));
    }

    graph.unstage_file(&path);
    graph.mark_removal(&path);
    tracing::debug!(%path, tracked, "marked for removal");
    Ok(())
}

/// Snapshot the staged files into a new commit on the current branch.
///
/// The new file table is the head's, minus every staged or removed path,
/// plus a fresh blob for each staged path. Both sets are cleared.
///
/// # Errors
/// - [`Error::EmptyMessage`] for a blank message.
/// - [`Error::NothingToCommit`] when nothing is staged and no marked path
///   is tracked by the head, i.e. the new commit would equal its parent.
/// - [`Error::FileNotFound`] if a staged file vanished from the working tree.
/// - Content store failures.
pub fn commit<C: ContentStore, W: WorkingTree>(
    graph: &mut CommitGraph,
    store: &C,
    tree: &W,
    message: &str,
) -> Result<CommitId> {
    if message.trim().is_empty() {
        return Err(Error::EmptyMessage);
    }
    let head = graph.head_commit()?;
    let removes_tracked = graph.marked_for_removal().iter().any(|p| head.tracks(p));
    if graph.staged().is_empty() && !removes_tracked {
        return Err(Error::NothingToCommit);
    }

    let mut files = head.files.clone();
    files.retain(|path, _| !graph.marked_for_removal().contains(path));

    for path in graph.staged() {
        let bytes = tree
            .read(path)?
            .ok_or_else(|| Error::FileNotFound(path.clone()))?;
        files.insert(path.clone(), store.store(path, &bytes)?);
    }

    let id = graph.add_commit(message, files);
    graph.clear_staging();
    tracing::info!(commit = %id, branch = %graph.current_branch(), "committed");
    Ok(id)
}
