// src/cli/args.rs
use crate::config::ClipboardBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Put plain text on the clipboard
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Clipboard backend, overrides config file and CLIPWRITE_BACKEND
    #[arg(short, long, value_enum)]
    pub backend: Option<ClipboardBackend>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy text to the clipboard
    Copy {
        /// Text to copy; read from stdin when omitted
        text: Option<String>,

        #[arg(long = "strip-newline", help = "remove one trailing newline before copying")]
        strip_newline: bool,

        #[arg(short = 'q', long = "quiet", help = "do not print a confirmation")]
        quiet: bool,
    },
    /// Print the default configuration
    Config,
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
