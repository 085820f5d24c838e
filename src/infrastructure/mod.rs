pub mod clipboard;
pub mod di;
pub mod diagnostics;
pub mod osc52;
