//! `sprig reset` command - restore a commit and move the branch to it.

use anyhow::Result;

use super::utils::{confirm_destructive, open_repo, parse_commit_id};
use crate::output;
use crate::services::CheckoutService;

/// Run the reset command.
pub fn run(commit: &str, yes: bool) -> Result<()> {
    let commit = parse_commit_id(commit)?;
    let repo = open_repo()?;
    if !confirm_destructive(&repo, "Reset", yes)? {
        return Ok(());
    }

    let tree = repo.worktree();
    CheckoutService::new(&repo.state, &tree).reset(commit)?;

    output::success(&format!("Reset to commit {commit}"));
    Ok(())
}
