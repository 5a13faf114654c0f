//! Terminal video player module
//!
//! Plays a video as a grid of text glyphs, one full-screen redraw per frame.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: playback phases, statistics, results and errors
//! - `pacing/`: frame interval, clocks and the frame pacer
//! - `playback/`: the frame loop state machine
//! - `render/`: glyph frame rendering
//! - `input/`: keyboard handling for quitting
//! - `terminal`: raw mode guard and the cancellable clock
//!
//! # Usage
//!
//! ```no_run
//! use glyphplay::player::{play_file, PlayOptions, PlaybackResult};
//! use std::path::Path;
//!
//! match play_file(Path::new("clip.mp4"), &PlayOptions::default()) {
//!     Ok(PlaybackResult::Finished(stats)) => println!("{}", stats.summary()),
//!     Ok(PlaybackResult::Interrupted(_)) => println!("Stopped by user"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

pub(crate) mod input;
mod native;
pub mod pacing;
pub mod playback;
pub mod render;
pub mod state;
pub mod terminal;

pub use native::{effective_interval, play_file, resolve_dimensions, PlayOptions};
pub use playback::PlaybackLoop;
pub use state::{
    InputResult, PlaybackError, PlaybackPhase, PlaybackResult, PlaybackStats, StopReason,
};
