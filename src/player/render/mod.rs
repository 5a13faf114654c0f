//! Rendering components for the player.
//!
//! Frames are drawn as full glyph grids with a single write per frame.

mod glyphs;

pub use glyphs::{render_frame, TerminalRenderer, CURSOR_HOME, ROW_TERMINATOR};
