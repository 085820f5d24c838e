// src/application/services/clipboard_writer.rs
use crate::domain::services::clipboard::{settled, ClipboardCapability, Deferred, DiagnosticSink};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Puts text on the clipboard through an injected capability.
///
/// Every call returns a `Deferred`, whether the capability failed while being
/// invoked or later. Only the first kind is reported to the diagnostic sink.
#[derive(Debug, Clone)]
pub struct ClipboardWriter {
    capability: Arc<dyn ClipboardCapability>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ClipboardWriter {
    pub fn new(
        capability: Arc<dyn ClipboardCapability>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            capability,
            diagnostics,
        }
    }

    /// Single attempt, no retry and no timeout. `value` is passed on as-is.
    #[instrument(skip(self, value), fields(len = value.len()), level = "debug")]
    pub fn write(&self, value: &str) -> Deferred {
        match self.capability.write_text(value) {
            Ok(pending) => {
                debug!("Clipboard write dispatched");
                pending
            }
            Err(e) => {
                self.diagnostics.report(&e);
                settled(Err(e))
            }
        }
    }
}
