// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "clipwrite"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// CLI modules
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;

pub use application::services::clipboard_writer::ClipboardWriter;
pub use domain::error::{ClipboardError, ClipboardResult};
pub use domain::services::clipboard::{ClipboardCapability, Deferred, DiagnosticSink};
