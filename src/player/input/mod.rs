//! Input handling for the player.
//!
//! Only quitting is bound; every other event is ignored while a video plays.

mod keyboard;

pub use keyboard::handle_key_event;

use crossterm::event::Event;

use crate::player::state::InputResult;

/// Map a terminal event to a control flow signal.
///
/// Resize events are ignored: the picture keeps the dimensions captured at
/// startup.
pub fn handle_event(event: Event) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key),
        _ => InputResult::Continue,
    }
}
