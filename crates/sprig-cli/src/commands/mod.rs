//! Command definitions and runners.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod completions;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod reset;
pub mod rm;
pub mod status;
pub mod utils;

/// Sprig - a small local version-control tool.
#[derive(Debug, Parser)]
#[command(name = "sprig", version, about, propagate_version = true)]
pub struct Cli {
    /// Skip confirmation prompts before overwriting working-tree files.
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a repository in the current directory.
    Init {
        /// Name of the initial branch (defaults to the configured one).
        #[arg(long)]
        branch: Option<String>,
    },

    /// Stage a file for the next commit.
    Add { path: String },

    /// Unstage a file and mark it for removal.
    Rm { path: String },

    /// Record the staged changes.
    Commit { message: String },

    /// Show the history of the current head.
    Log {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show every commit ever made.
    #[command(name = "global-log")]
    GlobalLog {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the ids of all commits with the given message.
    Find { message: String },

    /// Show branches, staged files and files marked for removal.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Switch branch, or restore a file from the head or a commit.
    ///
    /// `checkout <branch>`, `checkout <path>` or `checkout <commit> <path>`.
    Checkout {
        /// Branch name, or a path when no such branch exists.
        target: String,
        /// File to restore from the commit given as `target`.
        path: Option<String>,
    },

    /// Create a branch at the current head.
    Branch { name: String },

    /// Delete a branch pointer.
    #[command(name = "rm-branch")]
    RmBranch { name: String },

    /// Restore a commit and move the current branch to it.
    Reset { commit: String },

    /// Merge another branch into the working tree.
    Merge { branch: String },

    /// Replay the current branch on top of another branch.
    Rebase {
        branch: String,
        /// Decide per commit whether to continue, skip or reword.
        #[arg(short, long)]
        interactive: bool,
    },

    /// Interactive rebase, same as `rebase --interactive`.
    #[command(name = "i-rebase")]
    IRebase { branch: String },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
