//! Integration module
//!
//! An integration is a named unit of optional SDK behavior with a one-time
//! setup hook. The name is the identity key: two instances sharing a name are
//! the same integration for both merging and installation.
//!
//! # Overview
//!
//! - [`Resolver`] computes the final integration set from defaults and user
//!   overrides without running any hook.
//! - [`InstallationRegistry`] records which names have been set up.
//! - [`Installer`] runs the hooks that the registry has not seen yet.
//!
//! # Example
//!
//! ```ignore
//! use beacon_core::integration::{FnIntegration, InstallationRegistry, Installer, Resolver};
//!
//! let registry = InstallationRegistry::new();
//! let resolved = Resolver::new(vec![FnIntegration::arc("breadcrumbs", || Ok(()))])
//!     .resolve(&options.default_integrations, &options.integrations)?;
//! let index = Installer::new(&registry).install(&resolved)?;
//! ```

mod installer;
mod registry;
mod resolver;

pub use installer::{IntegrationIndex, Installer};
pub use registry::{InstallOutcome, InstallationRegistry};
pub use resolver::{ResolvedIntegrations, Resolver};

use std::fmt;
use std::sync::Arc;

/// Trait for integrations
pub trait Integration: Send + Sync {
    /// Identity key used for overrides and deduplication
    fn name(&self) -> &str;

    /// Set up the integration
    ///
    /// Called at most once per process for a given name.
    fn setup_once(&self) -> anyhow::Result<()>;
}

/// Shared handle to an integration
pub type IntegrationRef = Arc<dyn Integration>;

impl fmt::Debug for dyn Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integration").field("name", &self.name()).finish()
    }
}

/// Integration backed by a closure
pub struct FnIntegration<F> {
    name: String,
    setup: F,
}

impl<F> FnIntegration<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    /// Create a new closure integration
    pub fn new(name: impl Into<String>, setup: F) -> Self {
        Self {
            name: name.into(),
            setup,
        }
    }
}

impl<F> FnIntegration<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
{
    /// Create a closure integration behind a shared handle
    pub fn arc(name: impl Into<String>, setup: F) -> IntegrationRef {
        Arc::new(Self::new(name, setup))
    }
}

impl<F> Integration for FnIntegration<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn setup_once(&self) -> anyhow::Result<()> {
        (self.setup)()
    }
}

/// Known integrations addressable by name
///
/// Used to turn integration names from a configuration file into instances.
#[derive(Debug, Clone, Default)]
pub struct IntegrationCatalog {
    entries: Vec<IntegrationRef>,
}

impl IntegrationCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an integration, replacing any entry with the same name
    pub fn register(&mut self, integration: IntegrationRef) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.name() == integration.name())
        {
            Some(slot) => *slot = integration,
            None => self.entries.push(integration),
        }
    }

    /// Look up an integration by name
    pub fn get(&self, name: &str) -> Option<&IntegrationRef> {
        self.entries.iter().find(|i| i.name() == name)
    }

    /// Names of all registered integrations
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|i| i.name()).collect()
    }

    /// Number of registered integrations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<IntegrationRef> for IntegrationCatalog {
    fn from_iter<T: IntoIterator<Item = IntegrationRef>>(iter: T) -> Self {
        let mut catalog = IntegrationCatalog::new();
        for integration in iter {
            catalog.register(integration);
        }
        catalog
    }
}
