//! glyphplay - play videos in the terminal as text glyphs
//!
//! A video is decoded and scaled to the terminal grid by `ffmpeg`, every
//! grayscale sample is mapped to a glyph from a brightness ramp, and each
//! frame is redrawn in place at the stream's frame rate.
//!
//! - `glyph`: palettes and the luminance quantizer
//! - `frame`: terminal dimensions and the scaled frame buffer
//! - `decode`: the decode-and-scale service (`ffprobe` / `ffmpeg`)
//! - `player`: rendering, pacing and the playback loop
//! - `config`: the TOML configuration file
//! - `cli`: the command-line definition shared with `xtask`

pub mod cli;
pub mod config;
pub mod decode;
pub mod frame;
pub mod glyph;
pub mod player;

pub use config::{Config, ConfigError};
pub use decode::{DecodeError, Decoded, FrameSource};
pub use frame::{ScaledFrameBuffer, TerminalDimensions};
pub use glyph::{GlyphPalette, LuminanceQuantizer, PaletteError};
pub use player::{play_file, PlayOptions, PlaybackError, PlaybackResult, PlaybackStats};
