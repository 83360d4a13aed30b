//! Integration installation

use super::registry::{InstallOutcome, InstallationRegistry};
use super::resolver::ResolvedIntegrations;
use super::IntegrationRef;
use crate::error::{BeaconError, Result};
use tracing::{debug, info};

/// Integrations of a bootstrap call, keyed by name
///
/// Contains every resolved integration, including those that another call
/// had already installed.
#[derive(Debug, Clone, Default)]
pub struct IntegrationIndex {
    integrations: Vec<IntegrationRef>,
    newly_installed: Vec<String>,
}

impl IntegrationIndex {
    /// Look up an integration by name
    pub fn get(&self, name: &str) -> Option<&IntegrationRef> {
        self.integrations.iter().find(|i| i.name() == name)
    }

    /// Check if an integration is part of this index
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in installation order
    pub fn names(&self) -> Vec<&str> {
        self.integrations.iter().map(|i| i.name()).collect()
    }

    /// Names whose setup hook ran during this call
    pub fn newly_installed(&self) -> &[String] {
        &self.newly_installed
    }

    /// Number of integrations
    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }
}

/// Runs setup hooks gated by an installation registry
pub struct Installer<'a> {
    registry: &'a InstallationRegistry,
}

impl<'a> Installer<'a> {
    /// Create an installer backed by `registry`
    pub fn new(registry: &'a InstallationRegistry) -> Self {
        Self { registry }
    }

    /// Install the resolved integrations in order
    ///
    /// Names already in the registry are skipped. The first failing hook
    /// stops the call; integrations after it are left untouched and the
    /// failing name stays unmarked so a later call can retry it.
    pub fn install(&self, resolved: &ResolvedIntegrations) -> Result<IntegrationIndex> {
        let mut index = IntegrationIndex::default();

        for integration in resolved {
            let name = integration.name();
            let outcome = self
                .registry
                .install_with(name, || integration.setup_once())
                .map_err(|source| BeaconError::SetupFailed {
                    name: name.to_string(),
                    source,
                })?;

            match outcome {
                InstallOutcome::Installed => {
                    info!("Integration installed: {}", name);
                    index.newly_installed.push(name.to_string());
                }
                InstallOutcome::AlreadyInstalled => {
                    debug!("Integration already installed, skipping: {}", name);
                }
                InstallOutcome::InProgress => {
                    debug!("Integration is being set up further up the stack, skipping: {}", name);
                }
            }
            index.integrations.push(integration.clone());
        }

        Ok(index)
    }
}
