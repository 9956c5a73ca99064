use anyhow::Result;
use clap::Parser;
use log::info;

use grc_cli::cli::commands::{env_command, tui_command};
use grc_cli::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run); the TUI owns the
    // terminal, so nothing may log to stderr
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("grc-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting grc-cli");

    match cli.command {
        Commands::Env(args) => env_command(args).await,
        Commands::Tui(args) => tui_command(args).await,
    }
}
