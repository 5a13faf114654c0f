//! Playback logic for the player.
//!
//! This module holds the frame loop that ties the decoder, renderer and
//! pacer together.

mod session;

pub use session::PlaybackLoop;
