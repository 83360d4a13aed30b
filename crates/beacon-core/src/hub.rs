//! Hub and client boundary
//!
//! The hub tracks which client is current for an execution context. The
//! bootstrap only ever binds a client to it.

use crate::config::ClientOptions;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Trait for monitoring clients
pub trait Client: Send + Sync {
    /// Options the client was built with
    fn options(&self) -> &ClientOptions;
}

/// Trait for hubs
pub trait Hub: Send + Sync {
    /// Make `client` the current client of this hub
    fn bind_client(&self, client: Arc<dyn Client>);

    /// The currently bound client
    fn client(&self) -> Option<Arc<dyn Client>>;
}

/// In-process hub holding a single client
#[derive(Default)]
pub struct MainHub {
    client: RwLock<Option<Arc<dyn Client>>>,
}

impl MainHub {
    /// Create a hub with no client
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide hub
    pub fn process() -> Arc<MainHub> {
        static PROCESS_HUB: OnceLock<Arc<MainHub>> = OnceLock::new();
        Arc::clone(PROCESS_HUB.get_or_init(|| Arc::new(MainHub::new())))
    }
}

impl Hub for MainHub {
    fn bind_client(&self, client: Arc<dyn Client>) {
        let mut slot = self.client.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("Replacing client bound to hub");
        }
        *slot = Some(client);
    }

    fn client(&self) -> Option<Arc<dyn Client>> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

thread_local! {
    static THREAD_HUB: RefCell<Option<Arc<dyn Hub>>> = const { RefCell::new(None) };
}

/// The hub of the current execution context
///
/// A hub installed with [`with_hub`] on this thread takes precedence over the
/// process hub. Once the thread's locals are torn down, the process hub is
/// returned, so this is safe to call from panic hooks and destructors.
pub fn current_hub() -> Arc<dyn Hub> {
    THREAD_HUB
        .try_with(|hub| hub.try_borrow().ok().and_then(|hub| hub.clone()))
        .ok()
        .flatten()
        .unwrap_or_else(|| MainHub::process() as Arc<dyn Hub>)
}

struct RestoreHub(Option<Arc<dyn Hub>>);

impl Drop for RestoreHub {
    fn drop(&mut self) {
        let previous = self.0.take();
        let _ = THREAD_HUB.try_with(|hub| *hub.borrow_mut() = previous);
    }
}

/// Run `f` with `hub` as the current hub of this thread
pub fn with_hub<R>(hub: Arc<dyn Hub>, f: impl FnOnce() -> R) -> R {
    let previous = THREAD_HUB.with(|slot| slot.borrow_mut().replace(hub));
    let _restore = RestoreHub(previous);
    f()
}
