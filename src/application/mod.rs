// src/application/mod.rs
pub mod services;
