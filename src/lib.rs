pub mod api;
pub mod cli;
pub mod config;
pub mod survey;
pub mod tui;
