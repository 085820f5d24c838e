use crate::application::services::clipboard_writer::ClipboardWriter;
use crate::config::{ClipboardBackend, Settings};
use crate::domain::services::clipboard::{ClipboardCapability, DiagnosticSink};
use crate::infrastructure::clipboard::{MemoryClipboard, SystemClipboard};
use crate::infrastructure::diagnostics::TracingDiagnostics;
use crate::infrastructure::osc52::Osc52Clipboard;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Production service container - single source of truth for service creation
#[derive(Debug, Clone)]
pub struct ServiceContainer {
    pub backend: ClipboardBackend,
    pub capability: Arc<dyn ClipboardCapability>,
    pub diagnostics: Arc<dyn DiagnosticSink>,
    pub clipboard_writer: ClipboardWriter,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings) -> Self {
        let backend = Self::resolve_backend(config.backend, Self::is_ssh_session());
        let capability = Self::create_capability(backend);
        let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(TracingDiagnostics::new());
        Self::with_services(backend, capability, diagnostics)
    }

    /// Assemble from existing services (tests inject stubs here)
    pub fn with_services(
        backend: ClipboardBackend,
        capability: Arc<dyn ClipboardCapability>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let clipboard_writer = ClipboardWriter::new(capability.clone(), diagnostics.clone());
        Self {
            backend,
            capability,
            diagnostics,
            clipboard_writer,
        }
    }

    /// `Auto` becomes OSC 52 inside SSH sessions and the system clipboard elsewhere.
    #[instrument(level = "debug")]
    pub fn resolve_backend(requested: ClipboardBackend, ssh_session: bool) -> ClipboardBackend {
        let backend = match requested {
            ClipboardBackend::Auto if ssh_session => ClipboardBackend::Osc52,
            ClipboardBackend::Auto => ClipboardBackend::System,
            other => other,
        };
        debug!("Using clipboard backend: {}", backend);
        backend
    }

    fn create_capability(backend: ClipboardBackend) -> Arc<dyn ClipboardCapability> {
        match backend {
            ClipboardBackend::Osc52 => Arc::new(Osc52Clipboard::stderr()),
            ClipboardBackend::Memory => Arc::new(MemoryClipboard::new()),
            ClipboardBackend::System | ClipboardBackend::Auto => Arc::new(SystemClipboard::new()),
        }
    }

    fn is_ssh_session() -> bool {
        std::env::var("SSH_CONNECTION").is_ok()
            || std::env::var("SSH_CLIENT").is_ok()
            || std::env::var("SSH_TTY").is_ok()
    }
}
