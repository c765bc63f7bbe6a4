//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell
//! completion scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Binary name users type.
const BIN_NAME: &str = "parkade";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => {
                    eprintln!("#   parkade completions bash > ~/.local/share/bash-completion/completions/parkade");
                }
                Shell::Zsh => {
                    eprintln!("#   parkade completions zsh > ~/.zsh/completions/_parkade");
                    eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
                }
                Shell::Fish => {
                    eprintln!("#   parkade completions fish > ~/.config/fish/completions/parkade.fish");
                }
                Shell::PowerShell => {
                    eprintln!("#   parkade completions powershell | Out-String | Invoke-Expression");
                }
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
