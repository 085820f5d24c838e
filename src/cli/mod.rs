// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod clipboard_commands;
pub mod completion;
pub mod error;

pub fn execute_command(cli: Cli, services: &ServiceContainer) -> CliResult<()> {
    match cli.command {
        Some(Commands::Copy {
            text,
            strip_newline,
            quiet,
        }) => clipboard_commands::copy(
            services,
            text,
            strip_newline,
            quiet,
            &mut std::io::stdin().lock(),
        ),
        Some(Commands::Config) => {
            println!("{}", crate::config::generate_default_config());
            Ok(())
        }
        Some(Commands::Completion { shell }) => handle_completion(shell),
        None => Ok(()),
    }
}

fn handle_completion(shell: String) -> CliResult<()> {
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for clipwrite");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(clipwrite completion bash)\"        # one-time use");
            eprintln!("# - clipwrite completion bash >> ~/.bashrc       # add to bashrc");
            eprintln!("#");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for clipwrite");
            eprintln!("# - clipwrite completion zsh > ~/.zfunc/_clipwrite # save to fpath directory");
            eprintln!("#");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for clipwrite");
            eprintln!("# - clipwrite completion fish > ~/.config/fish/completions/clipwrite.fish");
            eprintln!("#");
        }
        _ => {}
    }

    completion::generate_completion(&shell, &mut std::io::stdout())
        .map_err(|e| CliError::Io(e).context("Failed to generate completion script"))
}
