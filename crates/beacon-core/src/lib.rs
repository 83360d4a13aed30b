//! beacon-core - Bootstrap core for the beacon monitoring SDK
//!
//! This crate turns a set of [`InitOptions`] into a client bound to the current
//! hub and a deduplicated set of integrations, each set up at most once per
//! process.

pub mod config;
pub mod error;
pub mod hub;
pub mod integration;
pub mod options;
pub mod sdk;

#[cfg(test)]
mod testing;

pub use config::{BeaconConfig, ClientOptions, IntegrationsConfig};
pub use error::{BeaconError, Result};
pub use hub::{current_hub, with_hub, Client, Hub, MainHub};
pub use integration::{
    FnIntegration, InstallOutcome, InstallationRegistry, Installer, Integration, IntegrationCatalog,
    IntegrationIndex, IntegrationRef, ResolvedIntegrations, Resolver,
};
pub use options::{DefaultIntegrations, InitOptions, IntegrationsOption};
pub use sdk::{init_and_bind, Bootstrap};
