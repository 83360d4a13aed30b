//! Config command
//!
//! Inspect beacon configuration.

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration and integration names
    Validate,

    /// Print the configuration file location
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_file: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(json, config_file),
        ConfigCommand::Validate => validate_config(config_file),
        ConfigCommand::Path => show_path(config_file),
    }
}

fn show_config(as_json: bool, config_file: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_file)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!();
        println!("{}", config.to_toml_string()?);
    }

    Ok(())
}

fn validate_config(config_file: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_file)?;
    super::resolve::resolve_config(&config)?;
    println!("{} Configuration is valid", "✓".green());
    Ok(())
}

fn show_path(config_file: Option<&Path>) -> Result<()> {
    match super::config_path(config_file) {
        Some(path) => println!("{}", path.display()),
        None => println!("(none, defaults in use)"),
    }
    Ok(())
}
