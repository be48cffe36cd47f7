//! rulegen - derive password mangling rules from leaked passwords

use clap::Parser;
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use rulegen::cli::{commands, Cli};
use rulegen::pipeline::CancellationToken;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "rulegen=debug" } else { "rulegen=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        eprintln!("{}: Ctrl-C handler not installed: {}", "Warning".yellow(), e);
    }

    if let Err(e) = commands::execute(cli, cancel) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
