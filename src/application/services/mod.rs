// src/application/services/mod.rs
pub mod clipboard_writer;

pub use clipboard_writer::ClipboardWriter;
