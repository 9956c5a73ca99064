//! Environment management: named connections to a GRC platform instance.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};

use crate::config::{Config, EnvironmentConfig};

#[derive(Args)]
pub struct EnvCommands {
    #[command(subcommand)]
    pub command: EnvSubcommands,
}

#[derive(Subcommand)]
pub enum EnvSubcommands {
    /// Add an environment (prompts for connection details)
    Add {
        /// Environment name; prompts when omitted
        name: Option<String>,
    },
    /// List configured environments
    List,
    /// Select the current environment
    Select {
        /// Environment name; prompts when omitted
        name: Option<String>,
    },
    /// Remove an environment
    Remove {
        /// Environment name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

pub async fn env_command(args: EnvCommands) -> Result<()> {
    match args.command {
        EnvSubcommands::Add { name } => add_environment(name),
        EnvSubcommands::List => list_environments(),
        EnvSubcommands::Select { name } => select_environment(name),
        EnvSubcommands::Remove { name, force } => remove_environment(&name, force),
    }
}

fn add_environment(name: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let name: String = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Environment name (e.g. 'production', 'staging')")
            .interact_text()?,
    };

    if config.environments.contains_key(&name) {
        let overwrite = Confirm::new()
            .with_prompt(format!("Environment '{}' already exists. Overwrite?", name))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{} Cancelled.", "✗".bright_red().bold());
            return Ok(());
        }
    }

    let host: String = Input::new()
        .with_prompt("Host URL (e.g. https://grc.example.com/api)")
        .interact_text()?;
    let api_token: String = Password::new().with_prompt("API token").interact()?;
    let user_id: String = Input::new().with_prompt("Respondent user id").interact_text()?;
    let user_name: String = Input::new()
        .with_prompt("Respondent display name")
        .interact_text()?;

    let already_has_current = config.current_environment.is_some();
    let set_current = if already_has_current {
        Confirm::new()
            .with_prompt("Set as current environment?")
            .default(false)
            .interact()?
    } else {
        // first environment becomes current inside add_environment
        false
    };

    config.add_environment(
        name.clone(),
        EnvironmentConfig {
            host,
            api_token,
            user_id,
            user_name,
        },
    )?;
    println!(
        "{} Environment '{}' saved",
        "✓".bright_green().bold(),
        name.bright_green().bold()
    );

    if set_current {
        config.set_current_environment(name.clone())?;
        println!(
            "{} Set '{}' as current environment",
            "✓".bright_green().bold(),
            name.bright_green().bold()
        );
    }

    Ok(())
}

fn list_environments() -> Result<()> {
    let config = Config::load()?;
    let mut names: Vec<&String> = config.list_environments();
    names.sort();

    if names.is_empty() {
        println!("  {}", "No environments configured".bright_yellow().bold());
        println!("  {}", "Run 'grc-cli env add' to get started.".dimmed());
        return Ok(());
    }

    println!();
    println!("  {}", "Configured environments:".bright_white().bold());
    for name in names {
        let environment = &config.environments[name];
        let (marker, name_colored, current_text) =
            if config.get_current_environment_name() == Some(name) {
                ("●", name.bright_green().bold(), " (current)".bright_green())
            } else {
                ("○", name.normal(), "".normal())
            };
        println!(
            "  {} {} {} as {}{}",
            marker.bright_green(),
            name_colored,
            environment.host.cyan(),
            environment.user_name.bright_yellow(),
            current_text
        );
    }
    println!();

    Ok(())
}

fn select_environment(name: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let name = match name {
        Some(name) => name,
        None => {
            let mut names: Vec<String> = config.environments.keys().cloned().collect();
            names.sort();
            if names.is_empty() {
                println!(
                    "  {}",
                    "No environments configured to select".bright_yellow().bold()
                );
                return Ok(());
            }

            let display: Vec<String> = names
                .iter()
                .map(|n| {
                    if config.get_current_environment_name() == Some(n) {
                        format!("{} (current)", n)
                    } else {
                        n.clone()
                    }
                })
                .collect();

            let picked = Select::new()
                .with_prompt("Select environment")
                .items(&display)
                .default(0)
                .interact()?;
            names[picked].clone()
        }
    };

    config.set_current_environment(name.clone())?;
    println!(
        "{} Selected environment: {}",
        "✓".bright_cyan().bold(),
        name.bright_green().bold()
    );
    Ok(())
}

fn remove_environment(name: &str, force: bool) -> Result<()> {
    let mut config = Config::load()?;

    if !force {
        if config.get_current_environment_name().map(String::as_str) == Some(name) {
            println!(
                "  {} '{}' is the current environment",
                "Warning:".bright_yellow().bold(),
                name.bright_green().bold()
            );
        }

        let confirm = Confirm::new()
            .with_prompt(format!("Remove environment '{}'?", name))
            .default(false)
            .interact()?;
        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    config.remove_environment(name)?;
    println!(
        "{} Environment '{}' removed",
        "✓".bright_green().bold(),
        name.bright_green().bold()
    );

    if config.get_current_environment_name().is_none() {
        println!("No current environment selected. Use 'grc-cli env select' to choose one.");
    }

    Ok(())
}
