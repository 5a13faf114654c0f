//! Subcommand handlers for the glyphplay binary.

pub mod completions;
pub mod config;
pub mod palettes;
pub mod play;
pub mod probe;
