//! Process context integration
//!
//! Captures static facts about the running process once, so clients can
//! attach them to events.

use beacon_core::Integration;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

static CONTEXT: OnceLock<ProcessContext> = OnceLock::new();

/// Static facts about the running process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessContext {
    /// Operating system
    pub os: String,
    /// OS family (unix, windows)
    pub family: String,
    /// CPU architecture
    pub arch: String,
    /// Process id
    pub pid: u32,
    /// Executable name, if known
    pub executable: Option<String>,
}

impl ProcessContext {
    /// Capture the context of the current process
    pub fn capture() -> Self {
        let executable = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));

        Self {
            os: std::env::consts::OS.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            pid: std::process::id(),
            executable,
        }
    }
}

/// Context captured by [`ProcessContextIntegration`], once it is installed
pub fn process_context() -> Option<&'static ProcessContext> {
    CONTEXT.get()
}

/// Captures the [`ProcessContext`]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessContextIntegration;

impl ProcessContextIntegration {
    /// Integration name
    pub const NAME: &'static str = "process-context";

    /// Create a new process context integration
    pub fn new() -> Self {
        Self
    }
}

impl Integration for ProcessContextIntegration {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn setup_once(&self) -> anyhow::Result<()> {
        let context = CONTEXT.get_or_init(ProcessContext::capture);
        debug!(os = %context.os, arch = %context.arch, pid = context.pid, "Captured process context");
        Ok(())
    }
}
