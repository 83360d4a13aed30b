//! Installation registry

use std::collections::BTreeMap;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tracing::trace;

static GLOBAL: InstallationRegistry = InstallationRegistry::new();

/// Result of asking the registry to install an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The setup hook ran during this call
    Installed,
    /// The name was already installed; the hook was not called
    AlreadyInstalled,
    /// This thread is running the name's hook further up the stack
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Installing(ThreadId),
    Installed,
}

/// Record of integration names whose setup hook has completed
///
/// A name is present if and only if [`mark_installed`](Self::mark_installed)
/// was called for it since the last [`reset`](Self::reset). The process-wide
/// instance is available through [`global`](Self::global); tests build their
/// own instances.
#[derive(Debug, Default)]
pub struct InstallationRegistry {
    states: Mutex<BTreeMap<String, State>>,
    changed: Condvar,
}

/// Clears an `Installing` claim when the hook fails or unwinds
struct Claim<'a> {
    registry: &'a InstallationRegistry,
    name: &'a str,
    completed: bool,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let mut states = self.registry.lock();
        if self.completed {
            states.insert(self.name.to_string(), State::Installed);
        } else if matches!(states.get(self.name), Some(State::Installing(_))) {
            states.remove(self.name);
        }
        drop(states);
        self.registry.changed.notify_all();
    }
}

impl InstallationRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            states: Mutex::new(BTreeMap::new()),
            changed: Condvar::new(),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static InstallationRegistry {
        &GLOBAL
    }

    // The lock is never held across a hook, so poisoning can only come from
    // a panic between two map operations; the map is still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, State>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if an integration has been installed
    pub fn has(&self, name: &str) -> bool {
        self.lock().get(name) == Some(&State::Installed)
    }

    /// Record an integration as installed
    pub fn mark_installed(&self, name: &str) {
        let previous = self.lock().insert(name.to_string(), State::Installed);
        if previous != Some(State::Installed) {
            trace!(integration = name, "Marked integration installed");
        }
        self.changed.notify_all();
    }

    /// Forget every installed name
    ///
    /// Intended for tests simulating a fresh process.
    pub fn reset(&self) {
        self.lock().clear();
        self.changed.notify_all();
    }

    /// Installed names in sorted order
    pub fn installed(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(_, state)| **state == State::Installed)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of installed names
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|state| **state == State::Installed)
            .count()
    }

    /// Check if nothing has been installed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `setup` unless `name` is already installed, then mark it
    ///
    /// A name is claimed before its hook runs and the lock is released while
    /// the hook executes. Other threads asking for the same name wait for the
    /// outcome; the claiming thread itself gets [`InstallOutcome::InProgress`]
    /// if its hook asks for the name again. If `setup` fails or panics the
    /// claim is dropped and the name stays unmarked.
    pub fn install_with<F, E>(&self, name: &str, setup: F) -> Result<InstallOutcome, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        let me = thread::current().id();
        let mut states = self.lock();
        loop {
            match states.get(name) {
                Some(State::Installed) => return Ok(InstallOutcome::AlreadyInstalled),
                Some(State::Installing(owner)) if *owner == me => {
                    return Ok(InstallOutcome::InProgress)
                }
                Some(State::Installing(_)) => {
                    states = self
                        .changed
                        .wait(states)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                None => break,
            }
        }
        states.insert(name.to_string(), State::Installing(me));
        drop(states);

        let mut claim = Claim {
            registry: self,
            name,
            completed: false,
        };
        setup()?;
        claim.completed = true;
        Ok(InstallOutcome::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = InstallationRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has("panic"));
    }

    #[test]
    fn test_mark_and_has() {
        let registry = InstallationRegistry::new();
        registry.mark_installed("panic");
        registry.mark_installed("panic");
        assert!(registry.has("panic"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let registry = InstallationRegistry::new();
        registry.mark_installed("b");
        registry.mark_installed("a");
        assert_eq!(registry.installed(), vec!["a".to_string(), "b".to_string()]);

        registry.reset();
        assert!(!registry.has("a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_install_with_runs_once() {
        let registry = InstallationRegistry::new();
        let calls = AtomicUsize::new(0);
        let setup = || -> Result<(), ()> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        assert_eq!(registry.install_with("x", setup), Ok(InstallOutcome::Installed));
        assert_eq!(registry.install_with("x", setup), Ok(InstallOutcome::AlreadyInstalled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_install_with_failure_leaves_name_unmarked() {
        let registry = InstallationRegistry::new();
        let result = registry.install_with("x", || Err("boom"));
        assert_eq!(result, Err("boom"));
        assert!(!registry.has("x"));

        assert_eq!(
            registry.install_with("x", || Ok::<(), &str>(())),
            Ok(InstallOutcome::Installed)
        );
    }

    #[test]
    fn test_registry_usable_after_panicking_hook() {
        let registry = InstallationRegistry::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.install_with("p", || -> Result<(), ()> { panic!("hook exploded") })
        }));

        assert!(result.is_err());
        assert!(!registry.has("p"));
        assert!(registry.is_empty());
        assert_eq!(
            registry.install_with("p", || Ok::<(), ()>(())),
            Ok(InstallOutcome::Installed)
        );
        assert!(registry.has("p"));
    }

    #[test]
    fn test_hook_may_query_registry() {
        let registry = InstallationRegistry::new();
        let outcome = registry.install_with("outer", || -> Result<(), ()> {
            assert!(!registry.has("outer"));
            assert_eq!(
                registry.install_with("outer", || Ok::<(), ()>(())),
                Ok(InstallOutcome::InProgress)
            );
            assert_eq!(
                registry.install_with("inner", || Ok::<(), ()>(())),
                Ok(InstallOutcome::Installed)
            );
            Ok(())
        });

        assert_eq!(outcome, Ok(InstallOutcome::Installed));
        assert_eq!(registry.installed(), vec!["inner".to_string(), "outer".to_string()]);
    }

    #[test]
    fn test_install_with_is_exclusive_across_threads() {
        let registry = Arc::new(InstallationRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    registry
                        .install_with("shared", || -> Result<(), ()> {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(5));
                            Ok(())
                        })
                        .unwrap()
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let installed = outcomes
            .iter()
            .filter(|outcome| **outcome == InstallOutcome::Installed)
            .count();

        assert_eq!(installed, 1);
        assert!(!outcomes.contains(&InstallOutcome::InProgress));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_waiter_retries_after_failed_claim() {
        let registry = Arc::new(InstallationRegistry::new());
        let (started_tx, started_rx) = mpsc::channel();

        let failing = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.install_with("flaky", || {
                    started_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(20));
                    Err("first attempt failed")
                })
            })
        };

        started_rx.recv().unwrap();
        let second = registry.install_with("flaky", || Ok::<(), &str>(()));

        assert_eq!(failing.join().unwrap(), Err("first attempt failed"));
        assert_eq!(second, Ok(InstallOutcome::Installed));
        assert!(registry.has("flaky"));
    }
}
