// src/domain/error.rs
use thiserror::Error;

/// The one failure kind a clipboard write reports.
///
/// Variants only carry what the host produced. Writers never branch on them;
/// they are forwarded to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type ClipboardResult<T> = Result<T, ClipboardError>;

// io::Error is neither Clone nor PartialEq, keep its rendering only
impl From<std::io::Error> for ClipboardError {
    fn from(e: std::io::Error) -> Self {
        ClipboardError::Io(e.to_string())
    }
}

impl From<arboard::Error> for ClipboardError {
    fn from(e: arboard::Error) -> Self {
        match e {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(e.to_string()),
            other => ClipboardError::WriteFailed(other.to_string()),
        }
    }
}
