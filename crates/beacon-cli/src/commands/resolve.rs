//! Resolve command
//!
//! Show which integrations a configuration selects, without running any
//! setup hook.

use anyhow::{Context, Result};
use beacon_core::{BeaconConfig, InitOptions, ResolvedIntegrations, Resolver};
use clap::Args;
use serde::Serialize;
use std::path::Path;

/// Arguments for the resolve command
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    defaults: bool,
    integrations: Vec<&'a str>,
}

/// Resolve the integration set for a configuration
pub fn resolve_config(config: &BeaconConfig) -> Result<ResolvedIntegrations> {
    let options = InitOptions::from_config(config, &beacon_integrations::catalog())
        .context("Invalid integration selection")?;
    let resolved = Resolver::new(beacon_integrations::default_integrations())
        .resolve(&options.default_integrations, &options.integrations)?;
    Ok(resolved)
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, config_file: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_file)?;
    let resolved = resolve_config(&config)?;

    if args.json {
        let report = ResolveReport {
            defaults: config.integrations.defaults,
            integrations: resolved.names(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if resolved.is_empty() {
        println!("{} No integrations selected", "⚠".yellow());
        return Ok(());
    }

    println!("{}", "Integrations (installation order):".bold().underline());
    for (position, name) in resolved.names().iter().enumerate() {
        println!("  {}. {}", position + 1, name.cyan());
    }
    Ok(())
}
