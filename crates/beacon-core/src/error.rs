//! Error types for beacon

use thiserror::Error;

/// Main error type for beacon
#[derive(Debug, Error)]
pub enum BeaconError {
    /// The client factory failed; nothing was bound or installed
    #[error("Client construction failed: {0}")]
    ClientConstruction(#[source] anyhow::Error),

    /// An integration cannot take part in resolution
    #[error("Invalid integration: {0}")]
    InvalidIntegration(String),

    /// A configured integration name is not in the catalog
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),

    /// An integration's setup hook failed
    #[error("Setup of integration '{name}' failed: {source}")]
    SetupFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BeaconError>,
    },
}

impl BeaconError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BeaconError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Name of the integration whose setup failed, if any
    pub fn failed_integration(&self) -> Option<&str> {
        match self {
            BeaconError::SetupFailed { name, .. } => Some(name),
            BeaconError::WithContext { source, .. } => source.failed_integration(),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for BeaconError {
    fn from(err: toml::de::Error) -> Self {
        BeaconError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for BeaconError {
    fn from(err: toml::ser::Error) -> Self {
        BeaconError::Toml(err.to_string())
    }
}

/// Result type alias for beacon
pub type Result<T> = std::result::Result<T, BeaconError>;
