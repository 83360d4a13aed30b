//! Test doubles shared by the unit tests

use crate::config::ClientOptions;
use crate::hub::Client;
use crate::integration::{Integration, IntegrationRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Integration that counts how often its hook ran
pub struct CountingIntegration {
    name: String,
    calls: AtomicUsize,
    fail: bool,
}

impl CountingIntegration {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub trait AsIntegrationRef {
    fn as_ref_arc(&self) -> IntegrationRef;
}

impl AsIntegrationRef for Arc<CountingIntegration> {
    fn as_ref_arc(&self) -> IntegrationRef {
        self.clone()
    }
}

impl Integration for CountingIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup_once(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("{} refused to start", self.name);
        }
        Ok(())
    }
}

/// Client that only keeps its options
pub struct TestClient {
    options: ClientOptions,
}

impl TestClient {
    pub fn new(options: &ClientOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }
}

impl Client for TestClient {
    fn options(&self) -> &ClientOptions {
        &self.options
    }
}
