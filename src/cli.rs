//! Command-line interface definition.
//!
//! Lives in the library so the `xtask` crate can render man pages from the
//! same definition the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::player::pacing::{is_valid_rate, MAX_FPS, MIN_FPS};

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-dev+",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("GLYPHPLAY_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GLYPHPLAY_BUILD_DATE"),
    ")"
);

/// Play videos in the terminal as text glyphs
#[derive(Parser, Debug)]
#[command(name = "glyphplay", version = VERSION, about, long_about = None)]
#[command(after_help = "\
Keys during playback:
  q, Esc, Ctrl-C   stop playback

Environment:
  GLYPHPLAY_CONFIG   config file location
  GLYPHPLAY_LOG      log filter (falls back to RUST_LOG, then [logging].level)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a video file
    Play(PlayArgs),

    /// Show the video stream of a file and the frame interval it would play at
    Probe {
        /// Video file to inspect
        file: PathBuf,
    },

    /// List the built-in glyph palettes
    Palettes,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Video file to play
    pub file: PathBuf,

    /// Preset name (see `glyphplay palettes`) or a literal glyph ramp
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Reverse the palette for light-background terminals
    #[arg(short, long)]
    pub invert: bool,

    /// Force a frame rate instead of the one the file declares
    #[arg(long, value_parser = parse_frame_rate)]
    pub fps: Option<f64>,

    /// Picture width in columns (default: terminal width)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Picture height in rows (default: terminal height minus reserved rows)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_frame_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if is_valid_rate(rate) {
        Ok(rate)
    } else {
        Err(format!(
            "must be between {} and {} fps, got {}",
            MIN_FPS, MAX_FPS, value
        ))
    }
}
