//! `sprig merge` command - merge another branch into the working tree.

use anyhow::Result;
use sprig_core::FileAction;

use super::utils::{confirm_destructive, open_repo};
use crate::output;
use crate::services::MergeService;

/// Run the merge command.
pub fn run(branch: &str, yes: bool) -> Result<()> {
    let repo = open_repo()?;
    if !confirm_destructive(&repo, "Merge", yes)? {
        return Ok(());
    }

    let tree = repo.worktree();
    let result = MergeService::new(&repo.state, &repo.store, &tree).merge(branch)?;

    if result.is_noop() {
        output::info(&format!("Nothing to merge from '{branch}'"));
        return Ok(());
    }

    for action in &result.actions {
        match action {
            FileAction::TakeGiven { path, .. } => output::detail(&format!("  updated   {path}")),
            FileAction::Conflict {
                path,
                conflict_path,
                ..
            } => output::warn(&format!("Conflict in {path}, incoming version in {conflict_path}")),
        }
    }

    let conflicts = result.conflicts().count();
    if conflicts == 0 {
        output::success(&format!("Merged '{branch}' into the working tree"));
    } else {
        output::warn(&format!(
            "Merged '{branch}' with {conflicts} conflict(s) - resolve them, then add and commit"
        ));
    }
    Ok(())
}
