//! `sprig branch` and `sprig rm-branch` commands.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::BranchService;

/// Create a branch at the current head.
pub fn run(name: &str) -> Result<()> {
    let repo = open_repo()?;
    BranchService::new(&repo.state).create(name)?;

    output::success(&format!("Created branch '{name}'"));
    Ok(())
}

/// Delete a branch pointer.
pub fn run_remove(name: &str) -> Result<()> {
    let repo = open_repo()?;
    BranchService::new(&repo.state).remove(name)?;

    output::success(&format!("Removed branch '{name}'"));
    Ok(())
}
