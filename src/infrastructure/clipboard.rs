// src/infrastructure/clipboard.rs
use crate::domain::error::{ClipboardError, ClipboardResult};
use crate::domain::services::clipboard::{settled, ClipboardCapability, Deferred};
use std::sync::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, instrument};

// Linux Clipboard Implementation Strategy:
//
// On Linux, clipboard data is not stored in a central buffer but is "owned" by a process.
// If clipwrite exits right after the write, content owned by it is lost.
//
// `arboard` needs the process to stay alive or hand the data over to a clipboard
// manager, and Wayland compositors often block the protocol it uses.
//
// We delegate to `wl-copy` (Wayland) or `xclip`/`xsel` (X11) instead. These fork into
// the background and keep ownership after we terminate.
#[cfg(not(target_os = "linux"))]
use arboard::Clipboard;

/// Clipboard of the desktop session.
///
/// The blocking host work runs on tokio's blocking pool, so a runtime must be
/// current when `write_text` is called.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardCapability for SystemClipboard {
    #[instrument(skip(self, value), level = "trace")]
    fn write_text(&self, value: &str) -> ClipboardResult<Deferred> {
        let handle = Handle::try_current()
            .map_err(|e| ClipboardError::Unavailable(format!("No async runtime: {}", e)))?;

        #[cfg(target_os = "linux")]
        let target = LinuxTarget::detect_from(|key| std::env::var(key).ok())?;

        let text = value.to_string();
        let task = handle.spawn_blocking(move || {
            #[cfg(target_os = "linux")]
            {
                copy_linux(target, &text)
            }

            #[cfg(not(target_os = "linux"))]
            {
                copy_arboard(&text)
            }
        });

        Ok(Box::pin(async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(ClipboardError::WriteFailed(format!(
                    "Clipboard task failed: {}",
                    e
                ))),
            }
        }))
    }
}

#[cfg(not(target_os = "linux"))]
fn copy_arboard(text: &str) -> ClipboardResult<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    debug!("Successfully copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Display server the Linux session runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxTarget {
    Wayland,
    X11,
}

impl LinuxTarget {
    /// Fails when neither `WAYLAND_DISPLAY` nor `DISPLAY` is set.
    pub fn detect_from(lookup: impl Fn(&str) -> Option<String>) -> ClipboardResult<Self> {
        if lookup("WAYLAND_DISPLAY").is_some() {
            Ok(LinuxTarget::Wayland)
        } else if lookup("DISPLAY").is_some() {
            Ok(LinuxTarget::X11)
        } else {
            Err(ClipboardError::Unavailable(
                "No graphical session: neither WAYLAND_DISPLAY nor DISPLAY is set".to_string(),
            ))
        }
    }
}

#[cfg(target_os = "linux")]
#[instrument(skip(text), level = "debug")]
fn copy_linux(target: LinuxTarget, text: &str) -> ClipboardResult<()> {
    match target {
        LinuxTarget::Wayland => {
            debug!("Wayland detected, using wl-copy");
            copy_with_wl_copy(text)
        }
        LinuxTarget::X11 => {
            debug!("X11 detected, using X11 clipboard tools");
            copy_with_x11(text)
        }
    }
}

#[cfg(target_os = "linux")]
fn copy_with_wl_copy(text: &str) -> ClipboardResult<()> {
    match pipe_to("wl-copy", &[], text) {
        Ok(()) => {
            debug!("Successfully copied {} bytes to clipboard", text.len());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ClipboardError::Unavailable(
            "wl-copy not found. Install wl-clipboard package for clipboard support on Wayland."
                .to_string(),
        )),
        Err(e) => Err(ClipboardError::WriteFailed(format!("wl-copy failed: {}", e))),
    }
}

/// xclip first, xsel when xclip is not installed.
#[cfg(target_os = "linux")]
fn copy_with_x11(text: &str) -> ClipboardResult<()> {
    debug!("Attempting clipboard copy with xclip");

    let result = match pipe_to("xclip", &["-selection", "clipboard"], text) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("xclip not found, falling back to xsel");
            match pipe_to("xsel", &["--clipboard", "--input"], text) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ClipboardError::Unavailable(
                        "No X11 clipboard tool found. Install xclip or xsel.".to_string(),
                    ))
                }
                other => {
                    other.map_err(|e| ClipboardError::WriteFailed(format!("xsel failed: {}", e)))
                }
            }
        }
        other => other.map_err(|e| ClipboardError::WriteFailed(format!("xclip failed: {}", e))),
    };

    if result.is_ok() {
        debug!("Successfully copied {} bytes to clipboard", text.len());
    }
    result
}

/// Runs `program` with `text` on stdin. Returns io::Result to allow distinguishing NotFound.
#[cfg(target_os = "linux")]
fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdin = child.stdin.take().ok_or_else(|| {
        std::io::Error::other(format!("Failed to open stdin pipe for {}", program))
    })?;
    let written = stdin.write_all(text.as_bytes());
    drop(stdin); // close to signal EOF

    // reap the child even when the pipe broke; its exit status explains why
    let status = child.wait()?;

    if !status.success() {
        return Err(exit_status_error(program, status));
    }
    written
}

#[cfg(target_os = "linux")]
fn exit_status_error(program: &str, status: std::process::ExitStatus) -> std::io::Error {
    std::io::Error::other(format!("{} exited with status: {}", program, status))
}

/// Process-local clipboard. Keeps the last value written.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ClipboardCapability for MemoryClipboard {
    #[instrument(skip(self, value), level = "trace")]
    fn write_text(&self, value: &str) -> ClipboardResult<Deferred> {
        let result = match self.contents.lock() {
            Ok(mut contents) => {
                *contents = Some(value.to_string());
                Ok(())
            }
            Err(_) => Err(ClipboardError::WriteFailed(
                "Memory clipboard poisoned".to_string(),
            )),
        };
        Ok(settled(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::init_test_env;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn given_wayland_display_when_detecting_then_prefers_wayland() {
        let target = LinuxTarget::detect_from(lookup(&[
            ("WAYLAND_DISPLAY", "wayland-0"),
            ("DISPLAY", ":0"),
        ]));
        assert_eq!(target, Ok(LinuxTarget::Wayland));
    }

    #[test]
    fn given_only_x_display_when_detecting_then_x11() {
        let target = LinuxTarget::detect_from(lookup(&[("DISPLAY", ":0")]));
        assert_eq!(target, Ok(LinuxTarget::X11));
    }

    #[test]
    fn given_no_display_when_detecting_then_unavailable() {
        let target = LinuxTarget::detect_from(lookup(&[]));
        assert!(matches!(target, Err(ClipboardError::Unavailable(_))));
    }

    #[test]
    fn given_no_runtime_when_system_write_then_fails_synchronously() {
        init_test_env();
        let result = SystemClipboard::new().write_text("hello");
        assert!(matches!(result, Err(ClipboardError::Unavailable(_))));
    }

    #[tokio::test]
    async fn given_memory_clipboard_when_written_twice_then_keeps_last_value() {
        init_test_env();
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.write_text("first").unwrap().await.unwrap();
        clipboard.write_text("").unwrap().await.unwrap();

        assert_eq!(clipboard.contents(), Some(String::new()));
    }

    #[test]
    fn given_poisoned_memory_clipboard_when_write_then_deferred_rejects() {
        init_test_env();
        let clipboard = MemoryClipboard::new();
        std::thread::scope(|s| {
            let holder = s.spawn(|| {
                let _guard = clipboard.contents.lock().unwrap();
                panic!("poison the clipboard lock");
            });
            assert!(holder.join().is_err());
        });

        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(clipboard.write_text("lost").unwrap());

        assert!(matches!(result, Err(ClipboardError::WriteFailed(_))));
        assert_eq!(clipboard.contents(), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn given_reading_tool_when_piping_then_ok() {
        assert!(pipe_to("cat", &[], "hello").is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn given_tool_exiting_early_when_piping_large_input_then_reports_exit_status() {
        let text = "x".repeat(1 << 20);

        let err = pipe_to("sh", &["-c", "exit 3"], &text).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert!(err.to_string().contains("sh exited with status"));
        assert!(err.to_string().contains('3'));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn given_missing_tool_when_piping_then_not_found() {
        let err = pipe_to("clipwrite-no-such-tool", &[], "hello").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
