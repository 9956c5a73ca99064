pub mod env;
pub mod tui;

pub use env::{EnvCommands, env_command};
pub use tui::{TuiCommands, tui_command};
