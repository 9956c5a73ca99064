use super::commands::env::EnvCommands;
use super::commands::tui::TuiCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "grc-cli")]
#[command(about = "A terminal console for filling and reviewing GRC surveys")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Environment management
    Env(EnvCommands),
    /// Launch the interactive console
    Tui(TuiCommands),
}
