//! Bootstrap command
//!
//! Run the SDK bootstrap in this process with a console client and report
//! which setup hooks ran.

use anyhow::{Context, Result};
use beacon_core::{Client, ClientOptions, InitOptions};
use clap::Args;
use std::path::Path;
use tracing::info;

/// Arguments for the bootstrap command
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Number of times to run the bootstrap
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,
}

/// Client that writes what it would capture to the log
pub struct ConsoleClient {
    options: ClientOptions,
}

impl ConsoleClient {
    /// Build a console client from init options
    pub fn from_options(options: &InitOptions) -> anyhow::Result<Self> {
        if !options.client.enabled {
            info!("Client is disabled and will not capture events");
        }
        Ok(Self {
            options: options.client.clone(),
        })
    }
}

impl Client for ConsoleClient {
    fn options(&self) -> &ClientOptions {
        &self.options
    }
}

/// Execute the bootstrap command
pub fn execute(args: BootstrapArgs, config_file: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_file)?;
    let options = InitOptions::from_config(&config, &beacon_integrations::catalog())
        .context("Invalid integration selection")?;

    for round in 1..=args.repeat {
        let index = beacon_integrations::init(ConsoleClient::from_options, options.clone())
            .with_context(|| format!("Bootstrap round {} failed", round))?;

        println!("{}", format!("Round {}", round).bold().underline());
        for name in index.names() {
            let ran = index.newly_installed().iter().any(|n| n == name);
            if ran {
                println!("  {} {} set up", "✓".green(), name);
            } else {
                println!("  {} {} already installed", "-".dimmed(), name);
            }
        }
        if index.is_empty() {
            println!("  {} no integrations", "⚠".yellow());
        }
    }

    Ok(())
}
