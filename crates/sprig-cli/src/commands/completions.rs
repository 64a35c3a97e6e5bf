//! `sprig completions` - print a completion script for a shell.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use super::Cli;

/// Print the completion script for `shell` to stdout.
pub fn run(shell: Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_script(shell, &mut out);
    out.flush().context("Failed to write completions")
}

/// Write the script for every subcommand, named after the binary.
fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
}
