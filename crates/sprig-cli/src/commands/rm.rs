//! `sprig rm` command - Unstage a file and mark it for removal.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::StagingService;

/// Run the rm command.
pub fn run(path: &str) -> Result<()> {
    let repo = open_repo()?;
    let tree = repo.worktree();

    StagingService::new(&repo.state, &repo.store, &tree).remove(path)?;

    output::success(&format!("Marked {path} for removal"));
    Ok(())
}
