//! `sprig checkout` command - switch branch or restore a file.

use anyhow::Result;

use super::utils::{confirm_destructive, open_repo, parse_commit_id};
use crate::output;
use crate::services::{CheckoutOutcome, CheckoutService};

/// Run the checkout command.
///
/// With one argument, `target` is a branch or else a path in the head.
/// With two, `target` is a commit id and `path` the file to restore.
pub fn run(target: &str, path: Option<&str>, yes: bool) -> Result<()> {
    let repo = open_repo()?;
    if !confirm_destructive(&repo, "Checkout", yes)? {
        return Ok(());
    }

    let tree = repo.worktree();
    let service = CheckoutService::new(&repo.state, &tree);

    if let Some(path) = path {
        let commit = parse_commit_id(target)?;
        service.checkout_file(commit, path)?;
        output::success(&format!("Restored {path} from commit {commit}"));
        return Ok(());
    }

    match service.checkout(target)? {
        CheckoutOutcome::Branch {
            name,
            switched: true,
        } => output::success(&format!("Switched to branch '{name}'")),
        CheckoutOutcome::Branch {
            name,
            switched: false,
        } => output::warn(&format!("Already on '{name}', files restored")),
        CheckoutOutcome::File { path } => output::success(&format!("Restored {path}")),
    }
    Ok(())
}
