//! Panic integration
//!
//! Chains a process panic hook that reports every panic through `tracing`
//! before handing it to the previously installed hook.

use beacon_core::{current_hub, Hub, Integration};
use std::any::Any;
use tracing::error;

/// Reports panics of the process
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicIntegration;

impl PanicIntegration {
    /// Integration name
    pub const NAME: &'static str = "panic";

    /// Create a new panic integration
    pub fn new() -> Self {
        Self
    }
}

/// Extract a readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "Box<dyn Any>"
    }
}

impl Integration for PanicIntegration {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn setup_once(&self) -> anyhow::Result<()> {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_default();
            let bound = current_hub().client().is_some();
            error!(
                panic = panic_message(info.payload()),
                location = %location,
                client_bound = bound,
                "Panic captured"
            );
            previous(info);
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(PanicIntegration::new().name(), "panic");
    }

    #[test]
    fn test_panic_message_from_str() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
    }

    #[test]
    fn test_panic_message_from_string() {
        let payload: Box<dyn Any + Send> = Box::new(format!("code {}", 7));
        assert_eq!(panic_message(payload.as_ref()), "code 7");
    }

    #[test]
    fn test_panic_message_opaque() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "Box<dyn Any>");
    }

    #[test]
    fn test_setup_keeps_panics_catchable() {
        PanicIntegration::new().setup_once().unwrap();
        let result = std::panic::catch_unwind(|| panic!("reported"));
        assert!(result.is_err());
    }
}
