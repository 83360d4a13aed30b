//! Configuration management for beacon

use crate::error::{BeaconError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// Options handed to the client
    pub client: ClientOptions,
    /// Integration selection
    pub integrations: IntegrationsConfig,
}

impl BeaconConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BeaconConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        if let Some(dsn) = &self.client.dsn {
            if dsn.trim().is_empty() {
                return Err(BeaconError::Config("dsn must not be empty when set".to_string()));
            }
        }

        let integrations = &self.integrations;
        for name in integrations.enabled.iter().chain(&integrations.disabled) {
            if name.trim().is_empty() {
                return Err(BeaconError::Config(
                    "integration names must not be empty".to_string(),
                ));
            }
        }

        let disabled: BTreeSet<&str> = integrations.disabled.iter().map(String::as_str).collect();
        if let Some(name) = integrations
            .enabled
            .iter()
            .find(|name| disabled.contains(name.as_str()))
        {
            return Err(BeaconError::Config(format!(
                "integration '{}' is both enabled and disabled",
                name
            )));
        }

        Ok(())
    }
}

/// Client options
///
/// Opaque to the bootstrap; passed through to client construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Where the client sends events
    pub dsn: Option<String>,
    /// Release identifier
    pub release: Option<String>,
    /// Deployment environment
    pub environment: Option<String>,
    /// Verbose SDK diagnostics
    pub debug: bool,
    /// Whether the client captures anything
    pub enabled: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            dsn: None,
            release: None,
            environment: None,
            debug: false,
            enabled: true,
        }
    }
}

impl ClientOptions {
    /// Options with a DSN set
    pub fn with_dsn(dsn: impl Into<String>) -> Self {
        Self {
            dsn: Some(dsn.into()),
            ..Self::default()
        }
    }
}

/// Integration selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Use the SDK's built-in integrations as defaults
    pub defaults: bool,
    /// Names removed from the defaults
    pub disabled: Vec<String>,
    /// Names added on top of the defaults
    pub enabled: Vec<String>,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            defaults: true,
            disabled: Vec::new(),
            enabled: Vec::new(),
        }
    }
}
