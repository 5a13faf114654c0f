//! Development tasks for glyphplay.
//!
//! Usage: `cargo run -p xtask -- man [--out-dir DIR]`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use glyphplay::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "glyphplay development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for glyphplay and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let command = Cli::command();
    write_page(&command, "glyphplay", out_dir)?;
    for sub in command.get_subcommands() {
        let name = format!("glyphplay-{}", sub.get_name());
        write_page(sub, &name, out_dir)?;
    }
    Ok(())
}

fn write_page(command: &clap::Command, name: &str, out_dir: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(command.clone()).render(&mut buffer)?;
    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated {}", path.display());
    Ok(())
}
