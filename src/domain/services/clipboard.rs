// src/domain/services/clipboard.rs
use crate::domain::error::{ClipboardError, ClipboardResult};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/// Outcome of a clipboard write that settles later.
///
/// Resolves exactly once. Dropping it abandons interest in the result but
/// does not cancel the host operation.
pub type Deferred = Pin<Box<dyn Future<Output = ClipboardResult<()>> + Send + 'static>>;

/// Host capability that puts plain text on a clipboard.
pub trait ClipboardCapability: Send + Sync + Debug {
    /// Starts a write of `value`.
    ///
    /// `Err` means the capability could not be invoked at all (no runtime,
    /// no display, no terminal). Failures of an invoked write are reported
    /// through the returned `Deferred`.
    fn write_text(&self, value: &str) -> ClipboardResult<Deferred>;
}

/// Sink for diagnostics about failures that never reached the host.
pub trait DiagnosticSink: Send + Sync + Debug {
    fn report(&self, error: &ClipboardError);
}

/// Deferred that is already settled with `result`.
pub fn settled(result: ClipboardResult<()>) -> Deferred {
    Box::pin(std::future::ready(result))
}
