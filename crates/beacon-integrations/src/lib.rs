//! beacon-integrations - Built-in integrations for beacon
//!
//! This crate provides the integrations installed by default and the SDK
//! entry point that wires them into the bootstrap.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beacon_core::{ClientOptions, InitOptions};
//!
//! let options = InitOptions::new(ClientOptions::with_dsn("https://key@example.com/1"));
//! let index = beacon_integrations::init(MyClient::from_options, options)?;
//! println!("installed: {:?}", index.newly_installed());
//! ```

pub mod panic;
pub mod process_context;

pub use panic::PanicIntegration;
pub use process_context::{process_context, ProcessContext, ProcessContextIntegration};

use beacon_core::{
    Bootstrap, Client, InitOptions, IntegrationCatalog, IntegrationIndex, IntegrationRef, Result,
};
use std::sync::Arc;

/// Integrations installed when the options do not name any defaults
pub fn default_integrations() -> Vec<IntegrationRef> {
    vec![
        Arc::new(PanicIntegration::new()),
        Arc::new(ProcessContextIntegration::new()),
    ]
}

/// Every integration that can be referenced by name from a config file
pub fn catalog() -> IntegrationCatalog {
    default_integrations().into_iter().collect()
}

/// Initialize the SDK
///
/// Builds the client, binds it to the current hub and installs integrations
/// with this crate's defaults as built-ins.
pub fn init<C, F>(factory: F, options: InitOptions) -> Result<IntegrationIndex>
where
    C: Client + 'static,
    F: FnOnce(&InitOptions) -> anyhow::Result<C>,
{
    Bootstrap::global()
        .with_built_ins(default_integrations())
        .init_and_bind(factory, options)
}
