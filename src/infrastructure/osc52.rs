// src/infrastructure/osc52.rs
use crate::domain::error::{ClipboardError, ClipboardResult};
use crate::domain::services::clipboard::{settled, ClipboardCapability, Deferred};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Terminal clipboard via the OSC 52 escape sequence.
///
/// Works over SSH as long as the terminal emulator honors OSC 52.
pub struct Osc52Clipboard {
    sink: Mutex<Box<dyn Write + Send>>,
    interactive: bool,
}

impl fmt::Debug for Osc52Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Osc52Clipboard")
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

impl Osc52Clipboard {
    /// Emits on stderr so stdout stays usable for pipelines.
    pub fn stderr() -> Self {
        let interactive = io::stderr().is_terminal();
        Self {
            sink: Mutex::new(Box::new(io::stderr())),
            interactive,
        }
    }

    /// `interactive` tells whether `sink` is attached to a terminal.
    pub fn with_writer(sink: impl Write + Send + 'static, interactive: bool) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
            interactive,
        }
    }

    fn emit(&self, sequence: &str) -> ClipboardResult<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| ClipboardError::WriteFailed("OSC 52 writer poisoned".to_string()))?;
        sink.write_all(sequence.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(value: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(value))
}

impl ClipboardCapability for Osc52Clipboard {
    #[instrument(skip(self, value), level = "trace")]
    fn write_text(&self, value: &str) -> ClipboardResult<Deferred> {
        if !self.interactive {
            return Err(ClipboardError::Unavailable(
                "OSC 52 needs a terminal, output is not a tty".to_string(),
            ));
        }
        let result = self.emit(&osc52_sequence(value));
        if result.is_ok() {
            debug!("Emitted OSC 52 sequence for {} bytes", value.len());
        }
        Ok(settled(result))
    }
}
