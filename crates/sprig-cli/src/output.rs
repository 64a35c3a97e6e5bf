//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

use crate::services::CommitInfo;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential output (always prints).
///
/// Use for results that should be available for piping, like commit ids.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Get a colored branch name with current indicator.
#[must_use]
pub fn branch_name(name: &str, is_current: bool) -> String {
    if is_current {
        format!("{} {}", "▶".cyan(), name.cyan().bold())
    } else {
        format!("  {name}")
    }
}

/// Format one log entry.
#[must_use]
pub fn commit_entry(commit: &CommitInfo) -> String {
    let mut header = format!("{} {}", "commit".yellow(), commit.id.to_string().yellow());
    if let Some(parent) = commit.parent {
        header.push_str(&format!(" {}", format!("(parent {parent})").dimmed()));
    }
    format!(
        "{}\n{header}\nDate: {}\n{}\n",
        "===".dimmed(),
        commit.date,
        commit.message
    )
}

/// Print a section heading (suppressed in quiet mode).
pub fn heading(title: &str) {
    if !is_quiet() {
        println!("{}", format!("=== {title} ===").bold());
    }
}
