//! glyphplay command-line entry point

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use glyphplay::cli::{Cli, Commands, ConfigCommands};
use glyphplay::Config;
use logging::LogSettings;

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(tarpaulin_include))]
fn run() -> Result<()> {
    let cli = Cli::parse();

    // These must work even when the config file is broken.
    match &cli.command {
        Commands::Completions { shell } => return commands::completions::handle(*shell),
        Commands::Palettes => return commands::palettes::handle(),
        Commands::Config {
            command: ConfigCommands::Path,
        } => return commands::config::handle_path(),
        Commands::Config {
            command: ConfigCommands::Init { force },
        } => return commands::config::handle_init(*force),
        _ => {}
    }

    let config = Config::load().context("Failed to load config")?;
    let mut settings = LogSettings {
        level: config.logging.level.clone(),
        file: config.logging.file_path(),
    };
    if let Commands::Play(args) = &cli.command {
        if let Some(path) = &args.log_file {
            settings.file = Some(path.clone());
        }
    }
    logging::init_logging(&settings)?;

    match cli.command {
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Probe { file } => commands::probe::handle(&file, &config),
        Commands::Config {
            command: ConfigCommands::Show,
        } => commands::config::handle_show(&config),
        Commands::Completions { .. } | Commands::Palettes | Commands::Config { .. } => Ok(()),
    }
}
