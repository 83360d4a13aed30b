//! Init command
//!
//! Write a beacon configuration template.

use super::CONFIG_FILE;
use anyhow::{Context, Result};
use beacon_core::BeaconConfig;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// DSN to put into the template
    #[arg(long)]
    pub dsn: Option<String>,

    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs, config_file: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    if path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    let content = generate_config(args.dsn.as_deref());
    BeaconConfig::from_toml_str(&content).context("Generated template is invalid")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", "✓".green(), path.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Set the dsn in the [client] section");
    println!("  2. Check the selected integrations:");
    println!("     {}", "beacon resolve".cyan());
    Ok(())
}

/// Generate a commented configuration template
pub fn generate_config(dsn: Option<&str>) -> String {
    let names = beacon_integrations::catalog()
        .names()
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ");

    let dsn_line = match dsn {
        Some(dsn) => format!("dsn = {}", toml::Value::String(dsn.to_string())),
        None => "# dsn = \"https://public@example.com/1\"".to_string(),
    };

    format!(
        r#"# beacon SDK configuration

[client]
{dsn_line}
# release = "my-app@1.0.0"
# environment = "production"
debug = false
enabled = true

[integrations]
# Install the built-in integrations: {names}
defaults = true
# Built-ins to leave out
disabled = []
# Integrations to add on top of the defaults
enabled = []
"#
    )
}
