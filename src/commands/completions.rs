//! Shell completion generation.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use glyphplay::cli::Cli;

/// Print the completion script for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
