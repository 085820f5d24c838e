// src/util/testing.rs

use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::error::{ClipboardError, ClipboardResult};
use crate::domain::services::clipboard::{
    settled, ClipboardCapability, Deferred, DiagnosticSink,
};

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes the test environment exactly once (logging only).
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["arboard", "mio", "tokio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the clipwrite environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    backend: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            backend: env::var("CLIPWRITE_BACKEND").ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var("CLIPWRITE_BACKEND");
        if let Some(val) = &self.backend {
            env::set_var("CLIPWRITE_BACKEND", val);
        }
    }
}

/// How a `StubCapability` answers a write.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Resolves `Ok(())` once polled.
    Resolve,
    /// Invoked fine, settles later with the error.
    Reject(ClipboardError),
    /// Fails while being invoked.
    Throw(ClipboardError),
}

/// Scriptable capability that records every value it was asked to write.
#[derive(Debug)]
pub struct StubCapability {
    default: StubBehavior,
    overrides: HashMap<String, StubBehavior>,
    calls: Mutex<Vec<String>>,
}

impl StubCapability {
    pub fn new(default: StubBehavior) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer writes of exactly `value` with `behavior`.
    pub fn with_override(mut self, value: &str, behavior: StubBehavior) -> Self {
        self.overrides.insert(value.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ClipboardCapability for StubCapability {
    fn write_text(&self, value: &str) -> ClipboardResult<Deferred> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(value.to_string());
        }
        let behavior = self
            .overrides
            .get(value)
            .unwrap_or(&self.default)
            .clone();
        match behavior {
            StubBehavior::Resolve => Ok(settled(Ok(()))),
            StubBehavior::Reject(e) => Ok(Box::pin(async move {
                tokio::task::yield_now().await;
                Err(e)
            })),
            StubBehavior::Throw(e) => Err(e),
        }
    }
}

/// Diagnostic sink that keeps every reported error.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<ClipboardError>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ClipboardError> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, error: &ClipboardError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(error.clone());
        }
    }
}
