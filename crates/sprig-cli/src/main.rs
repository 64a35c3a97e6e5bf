//! Sprig CLI - a small local version-control tool.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod services;

use commands::{Cli, Commands};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SPRIG_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    output::set_quiet(cli.quiet);

    let yes = cli.yes;
    let result = match cli.command {
        Commands::Init { branch } => commands::init::run(branch.as_deref()),
        Commands::Add { path } => commands::add::run(&path),
        Commands::Rm { path } => commands::rm::run(&path),
        Commands::Commit { message } => commands::commit::run(&message),
        Commands::Log { json } => commands::log::run(json),
        Commands::GlobalLog { json } => commands::log::run_global(json),
        Commands::Find { message } => commands::find::run(&message),
        Commands::Status { json } => commands::status::run(json),
        Commands::Checkout { target, path } => {
            commands::checkout::run(&target, path.as_deref(), yes)
        }
        Commands::Branch { name } => commands::branch::run(&name),
        Commands::RmBranch { name } => commands::branch::run_remove(&name),
        Commands::Reset { commit } => commands::reset::run(&commit, yes),
        Commands::Merge { branch } => commands::merge::run(&branch, yes),
        Commands::Rebase {
            branch,
            interactive,
        } => commands::rebase::run(&branch, interactive, yes),
        Commands::IRebase { branch } => commands::rebase::run(&branch, true, yes),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
