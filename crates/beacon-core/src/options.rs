//! Initialization options

use crate::config::{BeaconConfig, ClientOptions};
use crate::error::{BeaconError, Result};
use crate::integration::{IntegrationCatalog, IntegrationRef};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Callback that turns the defaults into the final integration list
pub type IntegrationsTransform =
    Arc<dyn Fn(Vec<IntegrationRef>) -> Vec<IntegrationRef> + Send + Sync>;

/// Source of the default integrations
#[derive(Clone, Default)]
pub enum DefaultIntegrations {
    /// Use the SDK's built-in integrations
    #[default]
    Omitted,
    /// No defaults at all
    Disabled,
    /// Replace the built-ins with this list
    List(Vec<IntegrationRef>),
}

/// User override of the integration set
#[derive(Clone, Default)]
pub enum IntegrationsOption {
    /// Defaults pass through unchanged
    #[default]
    Omitted,
    /// Merged with the defaults by name, these entries win
    List(Vec<IntegrationRef>),
    /// Receives the defaults and returns the final list
    Transform(IntegrationsTransform),
}

impl IntegrationsOption {
    /// Wrap a closure as a transform
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(Vec<IntegrationRef>) -> Vec<IntegrationRef> + Send + Sync + 'static,
    {
        IntegrationsOption::Transform(Arc::new(f))
    }
}

fn names(list: &[IntegrationRef]) -> Vec<&str> {
    list.iter().map(|i| i.name()).collect()
}

impl fmt::Debug for DefaultIntegrations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultIntegrations::Omitted => write!(f, "Omitted"),
            DefaultIntegrations::Disabled => write!(f, "Disabled"),
            DefaultIntegrations::List(list) => f.debug_tuple("List").field(&names(list)).finish(),
        }
    }
}

impl fmt::Debug for IntegrationsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationsOption::Omitted => write!(f, "Omitted"),
            IntegrationsOption::List(list) => f.debug_tuple("List").field(&names(list)).finish(),
            IntegrationsOption::Transform(_) => write!(f, "Transform(..)"),
        }
    }
}

/// Options for [`init_and_bind`](crate::sdk::init_and_bind)
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Passed through to the client factory
    pub client: ClientOptions,
    /// Source of the default integrations
    pub default_integrations: DefaultIntegrations,
    /// User override of the integration set
    pub integrations: IntegrationsOption,
}

impl InitOptions {
    /// Create options around the given client options
    pub fn new(client: ClientOptions) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    /// Replace the built-in defaults
    pub fn with_default_integrations(mut self, defaults: Vec<IntegrationRef>) -> Self {
        self.default_integrations = DefaultIntegrations::List(defaults);
        self
    }

    /// Turn off default integrations
    pub fn without_default_integrations(mut self) -> Self {
        self.default_integrations = DefaultIntegrations::Disabled;
        self
    }

    /// Override integrations by name
    pub fn with_integrations(mut self, integrations: Vec<IntegrationRef>) -> Self {
        self.integrations = IntegrationsOption::List(integrations);
        self
    }

    /// Compute the integration list from the defaults
    pub fn with_integrations_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<IntegrationRef>) -> Vec<IntegrationRef> + Send + Sync + 'static,
    {
        self.integrations = IntegrationsOption::transform(f);
        self
    }

    /// Build options from a configuration file
    ///
    /// Integration names are looked up in `catalog`; an unknown name is an
    /// error. Disabled names are filtered out of the defaults and enabled
    /// names are appended.
    pub fn from_config(config: &BeaconConfig, catalog: &IntegrationCatalog) -> Result<Self> {
        config.validate()?;
        let selection = &config.integrations;

        let lookup = |name: &String| {
            catalog
                .get(name)
                .cloned()
                .ok_or_else(|| BeaconError::UnknownIntegration(name.clone()))
        };
        let enabled = selection
            .enabled
            .iter()
            .map(lookup)
            .collect::<Result<Vec<_>>>()?;
        for name in &selection.disabled {
            lookup(name)?;
        }

        let default_integrations = if selection.defaults {
            DefaultIntegrations::Omitted
        } else {
            DefaultIntegrations::Disabled
        };

        let integrations = if enabled.is_empty() && selection.disabled.is_empty() {
            IntegrationsOption::Omitted
        } else {
            let disabled: BTreeSet<String> = selection.disabled.iter().cloned().collect();
            IntegrationsOption::transform(move |defaults| {
                defaults
                    .into_iter()
                    .filter(|i| !disabled.contains(i.name()))
                    .chain(enabled.iter().cloned())
                    .collect()
            })
        };

        Ok(Self {
            client: config.client.clone(),
            default_integrations,
            integrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{FnIntegration, Resolver};
    use pretty_assertions::assert_eq;

    fn catalog() -> IntegrationCatalog {
        ["panic", "process-context", "extra"]
            .into_iter()
            .map(|name| FnIntegration::arc(name, || Ok(())))
            .collect()
    }

    fn built_ins(catalog: &IntegrationCatalog) -> Vec<IntegrationRef> {
        ["panic", "process-context"]
            .iter()
            .filter_map(|name| catalog.get(name).cloned())
            .collect()
    }

    #[test]
    fn test_default_options() {
        let options = InitOptions::default();
        assert!(matches!(options.default_integrations, DefaultIntegrations::Omitted));
        assert!(matches!(options.integrations, IntegrationsOption::Omitted));
    }

    #[test]
    fn test_builder_methods() {
        let options = InitOptions::new(ClientOptions::with_dsn("https://k@h/1"))
            .without_default_integrations()
            .with_integrations(vec![FnIntegration::arc("x", || Ok(()))]);
        assert!(matches!(options.default_integrations, DefaultIntegrations::Disabled));
        assert_eq!(format!("{:?}", options.integrations), r#"List(["x"])"#);
        assert_eq!(options.client.dsn.as_deref(), Some("https://k@h/1"));
    }

    #[test]
    fn test_from_plain_config() {
        let options = InitOptions::from_config(&BeaconConfig::default(), &catalog()).unwrap();
        assert!(matches!(options.default_integrations, DefaultIntegrations::Omitted));
        assert!(matches!(options.integrations, IntegrationsOption::Omitted));
    }

    #[test]
    fn test_from_config_disables_and_enables() {
        let catalog = catalog();
        let mut config = BeaconConfig::default();
        config.integrations.disabled = vec!["panic".to_string()];
        config.integrations.enabled = vec!["extra".to_string()];

        let options = InitOptions::from_config(&config, &catalog).unwrap();
        let resolved = Resolver::new(built_ins(&catalog))
            .resolve(&options.default_integrations, &options.integrations)
            .unwrap();
        assert_eq!(resolved.names(), vec!["process-context", "extra"]);
    }

    #[test]
    fn test_from_config_without_defaults() {
        let catalog = catalog();
        let mut config = BeaconConfig::default();
        config.integrations.defaults = false;
        config.integrations.enabled = vec!["extra".to_string()];

        let options = InitOptions::from_config(&config, &catalog).unwrap();
        let resolved = Resolver::new(built_ins(&catalog))
            .resolve(&options.default_integrations, &options.integrations)
            .unwrap();
        assert_eq!(resolved.names(), vec!["extra"]);
    }

    #[test]
    fn test_from_config_unknown_name() {
        let mut config = BeaconConfig::default();
        config.integrations.disabled = vec!["breadcrumbs".to_string()];

        let err = InitOptions::from_config(&config, &catalog()).unwrap_err();
        assert!(matches!(err, BeaconError::UnknownIntegration(name) if name == "breadcrumbs"));
    }
}
