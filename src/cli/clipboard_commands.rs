// src/cli/clipboard_commands.rs
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use std::io::Read;
use tokio::runtime::Runtime;
use tracing::{debug, instrument};

/// Copy `text`, or everything on `input` when no text was given.
#[instrument(skip(services, text, input), level = "debug")]
pub fn copy(
    services: &ServiceContainer,
    text: Option<String>,
    strip_newline: bool,
    quiet: bool,
    input: &mut dyn Read,
) -> CliResult<()> {
    let value = read_value(text, input)?;
    let value = if strip_newline {
        strip_trailing_newline(&value)
    } else {
        value.as_str()
    };

    write_blocking(services, value)?;

    if !quiet {
        eprintln!("Copied!");
    }
    Ok(())
}

/// Drives one clipboard write to completion on a fresh runtime.
pub fn write_blocking(services: &ServiceContainer, value: &str) -> CliResult<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(async { services.clipboard_writer.write(value).await })?;
    debug!("Copied {} bytes using {} backend", value.len(), services.backend);
    Ok(())
}

fn read_value(text: Option<String>, input: &mut dyn Read) -> CliResult<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Removes one trailing `\n` or `\r\n`.
pub fn strip_trailing_newline(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(value)
}
