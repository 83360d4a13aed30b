//! Bootstrap: client construction, hub binding and integration installation

use crate::error::{BeaconError, Result};
use crate::hub::{current_hub, Client, Hub};
use crate::integration::{
    InstallationRegistry, Installer, IntegrationIndex, IntegrationRef, Resolver,
};
use crate::options::InitOptions;
use std::sync::Arc;
use tracing::debug;

/// Bootstrap for one registry and hub
///
/// [`Bootstrap::global`] uses the process-wide registry and looks up the
/// current hub on each call; tests build one around their own registry.
pub struct Bootstrap<'a> {
    registry: &'a InstallationRegistry,
    hub: Option<Arc<dyn Hub>>,
    resolver: Resolver,
}

impl Bootstrap<'static> {
    /// Bootstrap backed by the process-wide registry and the current hub
    pub fn global() -> Self {
        Self {
            registry: InstallationRegistry::global(),
            hub: None,
            resolver: Resolver::default(),
        }
    }
}

impl<'a> Bootstrap<'a> {
    /// Create a bootstrap without built-in integrations
    pub fn new(registry: &'a InstallationRegistry, hub: Arc<dyn Hub>) -> Self {
        Self {
            registry,
            hub: Some(hub),
            resolver: Resolver::default(),
        }
    }

    /// Set the built-in integrations used when defaults are omitted
    pub fn with_built_ins(mut self, built_ins: Vec<IntegrationRef>) -> Self {
        self.resolver = Resolver::new(built_ins);
        self
    }

    /// Construct a client, bind it and install integrations
    ///
    /// Resolution and installation run on every call, even if a client was
    /// already bound; the registry keeps hooks from running twice. Setup
    /// hooks may call back into the bootstrap.
    pub fn init_and_bind<C, F>(&self, factory: F, options: InitOptions) -> Result<IntegrationIndex>
    where
        C: Client + 'static,
        F: FnOnce(&InitOptions) -> anyhow::Result<C>,
    {
        let client = factory(&options).map_err(BeaconError::ClientConstruction)?;

        let hub = self.hub.clone().unwrap_or_else(current_hub);
        debug!(dsn = ?options.client.dsn, "Binding client to hub");
        hub.bind_client(Arc::new(client));

        let resolved = self
            .resolver
            .resolve(&options.default_integrations, &options.integrations)?;
        Installer::new(self.registry).install(&resolved)
    }
}

/// Initialize with the process-wide registry and the current hub
///
/// No built-in integrations are known at this level; omitted defaults
/// resolve to an empty list.
pub fn init_and_bind<C, F>(factory: F, options: InitOptions) -> Result<IntegrationIndex>
where
    C: Client + 'static,
    F: FnOnce(&InitOptions) -> anyhow::Result<C>,
{
    Bootstrap::global().init_and_bind(factory, options)
}
