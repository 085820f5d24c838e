//! Standard Unix exit codes for the clipwrite CLI.
//!
//! These codes follow the BSD convention (sysexits.h).

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// The clipboard could not be written
pub const UNAVAILABLE: i32 = 69;

/// Reading the input failed
pub const IOERR: i32 = 74;

/// Configuration file or environment is invalid
pub const CONFIG: i32 = 78;
