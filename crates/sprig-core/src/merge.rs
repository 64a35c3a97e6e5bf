//! Three-way change classification and working-tree merge.
//!
//! A merge never creates a commit. It compares both heads against their
//! split point and produces a list of file actions; applying them only
//! touches the working tree. Files changed on both sides are not merged
//! line by line: the incoming version is written next to the current one
//! under a `.conflicted` suffix.

use sprig_fs::{ContentHandle, ContentStore, WorkingTree};

use crate::ancestry::find_split_point;
use crate::commit::{Commit, CommitId, FileTable};
use crate::error::{Error, Result};
use crate::graph::CommitGraph;

/// Suffix appended to the path of the incoming side of a conflict.
pub const CONFLICT_SUFFIX: &str = ".conflicted";

/// Paths in `side` that differ from `split`, with their snapshot in `side`.
///
/// A path counts as modified if there is no split commit, if the split
/// commit does not track it, or if the two snapshots differ byte-wise.
/// Paths deleted in `side` are not reported.
///
/// # Errors
/// Propagates content store failures.
pub fn modified_since<C: ContentStore>(
    store: &C,
    split: Option<&Commit>,
    side: &Commit,
) -> Result<FileTable> {
    let mut modified = FileTable::new();
    for (path, handle) in &side.files {
        let changed = match split.and_then(|s| s.file(path)) {
            None => true,
            Some(base) => !store.equal(base, handle)?,
        };
        if changed {
            modified.insert(path.clone(), handle.clone());
        }
    }
    Ok(modified)
}

/// A single change to apply to the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Only the given branch changed the file: take its version.
    TakeGiven { path: String, handle: ContentHandle },

    /// Both branches changed the file: keep the current version at `path`
    /// and write the given version to `conflict_path`.
    Conflict {
        path: String,
        conflict_path: String,
        handle: ContentHandle,
    },
}

impl FileAction {
    /// Path the action writes to.
    #[must_use]
    pub fn target_path(&self) -> &str {
        match self {
            Self::TakeGiven { path, .. } => path,
            Self::Conflict { conflict_path, .. } => conflict_path,
        }
    }

    /// Snapshot the action writes.
    #[must_use]
    pub const fn handle(&self) -> &ContentHandle {
        match self {
            Self::TakeGiven { handle, .. } | Self::Conflict { handle, .. } => handle,
        }
    }

    /// Check if this action records a conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Outcome of a merge: the split point used and the file actions, ordered
/// by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Branch that was merged in.
    pub branch: String,
    /// Nearest common ancestor, if any.
    pub split: Option<CommitId>,
    /// Actions to apply to the working tree.
    pub actions: Vec<FileAction>,
}

impl MergeResult {
    /// Paths that ended up in conflict.
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().filter_map(|a| match a {
            FileAction::Conflict { path, .. } => Some(path.as_str()),
            FileAction::TakeGiven { .. } => None,
        })
    }

    /// Check if the merge changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }

    /// Write every action into the working tree.
    ///
    /// # Errors
    /// Propagates working tree failures. Files written before the failure
    /// are not rolled back.
    pub fn apply<W: WorkingTree>(&self, tree: &W) -> Result<()> {
        for action in &self.actions {
            tree.write(action.target_path(), action.handle())?;
        }
        Ok(())
    }
}

/// Classify every file changed since the split point of the current head
/// and `branch`'s head.
///
/// The graph is borrowed immutably: merging never alters commits or
/// branch pointers.
///
/// # Errors
/// Returns [`Error::CannotMergeSelf`] when `branch` is checked out,
/// [`Error::BranchNotFound`] for an unknown branch, and propagates content
/// store failures.
pub fn merge<C: ContentStore>(graph: &CommitGraph, branch: &str, store: &C) -> Result<MergeResult> {
    if graph.current_branch() == branch {
        return Err(Error::CannotMergeSelf);
    }
    let given_id = graph.branch_head(branch)?;

    let current = graph.head_commit()?;
    let given = graph.commit(given_id)?;
    let split_id = find_split_point(graph, current.id, given.id);
    let split = split_id.map(|id| graph.commit(id)).transpose()?;

    let modified_given = modified_since(store, split, given)?;
    let modified_current = modified_since(store, split, current)?;

    let actions: Vec<FileAction> = modified_given
        .into_iter()
        .map(|(path, handle)| {
            if modified_current.contains_key(&path) {
                tracing::debug!(%path, "modified on both sides");
                FileAction::Conflict {
                    conflict_path: format!("{path}{CONFLICT_SUFFIX}"),
                    path,
                    handle,
                }
            } else {
                tracing::debug!(%path, "taking incoming version");
                FileAction::TakeGiven { path, handle }
            }
        })
        .collect();

    tracing::info!(
        branch,
        actions = actions.len(),
        conflicts = actions.iter().filter(|a| a.is_conflict()).count(),
        "merge classified"
    );

    Ok(MergeResult {
        branch: branch.to_string(),
        split: split_id,
        actions,
    })
}
