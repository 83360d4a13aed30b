//! Integration resolution
//!
//! Reconciles default integrations with user overrides by name. Nothing in
//! here runs a setup hook.

use super::IntegrationRef;
use crate::error::{BeaconError, Result};
use crate::options::{DefaultIntegrations, IntegrationsOption};
use std::collections::HashMap;
use tracing::trace;

/// Ordered integration set with unique names
#[derive(Debug, Clone, Default)]
pub struct ResolvedIntegrations {
    integrations: Vec<IntegrationRef>,
}

impl ResolvedIntegrations {
    /// Names in installation order
    pub fn names(&self) -> Vec<&str> {
        self.integrations.iter().map(|i| i.name()).collect()
    }

    /// Look up an integration by name
    pub fn get(&self, name: &str) -> Option<&IntegrationRef> {
        self.integrations.iter().find(|i| i.name() == name)
    }

    /// Number of integrations
    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedIntegrations {
    type Item = &'a IntegrationRef;
    type IntoIter = std::slice::Iter<'a, IntegrationRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.integrations.iter()
    }
}

/// Name-keyed list that keeps first-seen positions
///
/// Inserting a name that is already present replaces the instance in place.
#[derive(Default)]
struct OrderedByName {
    slots: Vec<IntegrationRef>,
    positions: HashMap<String, usize>,
}

impl OrderedByName {
    fn insert(&mut self, integration: IntegrationRef) -> Result<()> {
        let name = integration.name();
        if name.trim().is_empty() {
            return Err(BeaconError::InvalidIntegration(
                "integration name must not be empty".to_string(),
            ));
        }

        match self.positions.get(name) {
            Some(&pos) => {
                trace!(integration = name, "Replacing integration with same name");
                self.slots[pos] = integration;
            }
            None => {
                self.positions.insert(name.to_string(), self.slots.len());
                self.slots.push(integration);
            }
        }
        Ok(())
    }

    fn extend(&mut self, integrations: impl IntoIterator<Item = IntegrationRef>) -> Result<()> {
        for integration in integrations {
            self.insert(integration)?;
        }
        Ok(())
    }

    fn finish(self) -> ResolvedIntegrations {
        ResolvedIntegrations {
            integrations: self.slots,
        }
    }
}

/// Computes the integration set to install
///
/// Holds the SDK's built-in integrations, used when the default list is
/// omitted from the options.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    built_ins: Vec<IntegrationRef>,
}

impl Resolver {
    /// Create a resolver with the given built-in defaults
    pub fn new(built_ins: Vec<IntegrationRef>) -> Self {
        Self { built_ins }
    }

    /// Resolve the final integration set
    ///
    /// - Defaults come from the options, the built-ins, or nothing when
    ///   disabled.
    /// - An explicit list is merged with the defaults by name; the explicit
    ///   instance wins and keeps the default's position.
    /// - A transform receives the full defaults and its result is the final
    ///   set; defaults it leaves out are not installed.
    ///
    /// Within one list a repeated name keeps its first position and the last
    /// instance.
    pub fn resolve(
        &self,
        default_integrations: &DefaultIntegrations,
        integrations: &IntegrationsOption,
    ) -> Result<ResolvedIntegrations> {
        let defaults: Vec<IntegrationRef> = match default_integrations {
            DefaultIntegrations::Omitted => self.built_ins.clone(),
            DefaultIntegrations::Disabled => Vec::new(),
            DefaultIntegrations::List(list) => list.clone(),
        };

        let mut merged = OrderedByName::default();
        match integrations {
            IntegrationsOption::Omitted => merged.extend(defaults)?,
            IntegrationsOption::List(explicit) => {
                merged.extend(defaults)?;
                merged.extend(explicit.iter().cloned())?;
            }
            IntegrationsOption::Transform(transform) => merged.extend(transform(defaults))?,
        }

        let resolved = merged.finish();
        trace!(integrations = ?resolved.names(), "Resolved integrations");
        Ok(resolved)
    }
}
