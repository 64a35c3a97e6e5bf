//! `sprig find` command - print ids of commits with a given message.

use anyhow::{Result, bail};

use super::utils::open_repo;
use crate::output;
use crate::services::LogService;

/// Run the find command.
pub fn run(message: &str) -> Result<()> {
    let repo = open_repo()?;
    let ids = LogService::new(&repo.state).find(message)?;

    if ids.is_empty() {
        bail!("Found no commit with that message");
    }
    for id in ids {
        output::essential(&id.to_string());
    }
    Ok(())
}
