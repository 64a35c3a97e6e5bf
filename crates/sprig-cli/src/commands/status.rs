//! `sprig status` command - show branches and the staging area.

use anyhow::Result;

use super::utils::open_repo;
use crate::output;
use crate::services::{StatusReport, StatusService};

/// Run the status command.
pub fn run(json: bool) -> Result<()> {
    let repo = open_repo()?;
    let status = StatusService::new(&repo.state).compute_status()?;

    if json {
        let json_output = serde_json::to_string_pretty(&status)?;
        println!("{json_output}");
    } else {
        print_status(&status);
    }
    Ok(())
}

fn print_status(status: &StatusReport) {
    output::heading("Branches");
    for branch in &status.branches {
        output::essential(&output::branch_name(&branch.name, branch.current));
    }

    output::detail("");
    output::heading("Staged Files");
    for path in &status.staged {
        output::essential(path);
    }

    output::detail("");
    output::heading("Removed Files");
    for path in &status.removed {
        output::essential(path);
    }
}
