//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod bootstrap;
pub mod config;
pub mod init;
pub mod resolve;

use anyhow::{Context, Result};
use beacon_core::BeaconConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name
pub const CONFIG_FILE: &str = "beacon.toml";

/// beacon - SDK bootstrap inspector
#[derive(Debug, Parser)]
#[command(name = "beacon")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BEACON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a configuration template
    Init(init::InitArgs),

    /// Show the integrations a configuration resolves to
    Resolve(resolve::ResolveArgs),

    /// Run the SDK bootstrap with a console client
    Bootstrap(bootstrap::BootstrapArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug = config_path(cli.config.as_deref())
        .filter(|path| path.exists())
        .and_then(|path| BeaconConfig::load(path).ok())
        .map(|config| config.client.debug)
        .unwrap_or(false);
    setup_logging(cli.verbose, debug);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_file = cli.config.as_deref();
    match cli.command {
        Commands::Init(args) => init::execute(args, config_file),
        Commands::Resolve(args) => resolve::execute(args, config_file),
        Commands::Bootstrap(args) => bootstrap::execute(args, config_file),
        Commands::Config(cmd) => config::execute(cmd, config_file),
    }
}

/// Locate the configuration file
///
/// An explicit path wins; otherwise `beacon.toml` in the current directory,
/// then the user configuration directory.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    directories::ProjectDirs::from("com", "beacon", "beacon")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Load the configuration, falling back to defaults when no file exists
pub fn load_config(explicit: Option<&Path>) -> Result<BeaconConfig> {
    match config_path(explicit) {
        Some(path) if path.exists() => BeaconConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        Some(path) => {
            anyhow::bail!("Configuration file not found: {}", path.display())
        }
        None => {
            warn!("No configuration file found, using defaults");
            Ok(BeaconConfig::default())
        }
    }
}

fn setup_logging(verbosity: u8, debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 if debug => EnvFilter::new("debug"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
