// src/cli/error.rs
use crate::config::ConfigError;
use crate::domain::error::ClipboardError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Clipboard(_) => crate::exitcode::UNAVAILABLE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::InvalidInput(_) | CliError::Other(_) => crate::exitcode::USAGE,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
