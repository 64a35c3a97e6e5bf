//! `sprig rebase` command - replay the current branch onto another.

use std::fmt;
use std::io::IsTerminal;

use anyhow::{Result, bail};
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};
use sprig_core::{Decision, DecisionSource, RebaseMode, RebaseOutcome, ReplayCandidate, StateStore};

use super::utils::{confirm_destructive, open_repo};
use crate::output;
use crate::services::{RebaseService, format_timestamp};

/// Run the rebase command.
pub fn run(branch: &str, interactive: bool, yes: bool) -> Result<()> {
    let repo = open_repo()?;
    if interactive && !std::io::stdin().is_terminal() {
        bail!("Interactive rebase needs a terminal");
    }
    if !confirm_destructive(&repo, "Rebase", yes)? {
        return Ok(());
    }

    let tree = repo.worktree();
    let service = RebaseService::new(&repo.state, &repo.store, &tree);

    let outcome = if interactive {
        let mut prompts = PromptDecisions {
            date_format: repo.state.load_config()?.log.date_format,
        };
        service.rebase(branch, RebaseMode::Interactive(&mut prompts))?
    } else {
        service.rebase(branch, RebaseMode::NonInteractive)?
    };

    print_outcome(branch, &outcome);
    Ok(())
}

fn print_outcome(branch: &str, outcome: &RebaseOutcome) {
    match outcome {
        RebaseOutcome::FastForward { from, to } => {
            output::success(&format!("Fast-forwarded from {from} to {to} ('{branch}')"));
        }
        RebaseOutcome::Replayed {
            onto,
            replayed,
            skipped,
            ..
        } => {
            for copy in replayed {
                let note = if copy.reworded { " (reworded)" } else { "" };
                output::detail(&format!("  {} -> {}{note}", copy.original, copy.new));
            }
            if !skipped.is_empty() {
                output::info(&format!("Skipped {} commit(s)", skipped.len()));
            }
            output::success(&format!(
                "Replayed {} commit(s) onto '{branch}' at {onto}",
                replayed.len()
            ));
        }
    }
}

/// Choices offered for each replay candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Continue,
    Skip,
    Reword,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue - replay as is"),
            Self::Skip => f.write_str("Skip - drop this commit"),
            Self::Reword => f.write_str("Reword - replay with a new message"),
        }
    }
}

/// Asks on the terminal for every replayed commit.
struct PromptDecisions {
    date_format: String,
}

impl DecisionSource for PromptDecisions {
    fn next(&mut self, candidate: &ReplayCandidate<'_>) -> sprig_core::Result<Decision> {
        let commit = candidate.commit;
        output::essential(&format!(
            "commit {}  {}\n    {}",
            commit.id,
            format_timestamp(commit.timestamp, &self.date_format),
            commit.message
        ));

        let mut choices = vec![Choice::Continue];
        if candidate.skippable {
            choices.push(Choice::Skip);
        }
        choices.push(Choice::Reword);

        let choice = Select::new("Replay this commit?", choices)
            .prompt()
            .map_err(abort)?;

        match choice {
            Choice::Continue => Ok(Decision::Continue),
            Choice::Skip => Ok(Decision::Skip),
            Choice::Reword => {
                let message = Text::new("New message:")
                    .with_initial_value(&commit.message)
                    .with_validator(|input: &str| {
                        Ok::<_, CustomUserError>(if input.trim().is_empty() {
                            Validation::Invalid("Message cannot be empty".into())
                        } else {
                            Validation::Valid
                        })
                    })
                    .prompt()
                    .map_err(abort)?;
                Ok(Decision::Reword(message))
            }
        }
    }
}

fn abort(e: InquireError) -> sprig_core::Error {
    sprig_core::Error::RebaseAborted(e.to_string())
}
