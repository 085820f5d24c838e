// src/infrastructure/diagnostics.rs
use crate::domain::error::ClipboardError;
use crate::domain::services::clipboard::DiagnosticSink;
use tracing::error;

/// Reports diagnostics as `tracing` error events.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, e: &ClipboardError) {
        error!(
            target: "clipwrite::diagnostics",
            error = %e,
            "Clipboard capability could not be invoked: {}",
            e
        );
    }
}
