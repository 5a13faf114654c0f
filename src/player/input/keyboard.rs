//! Keyboard input handling for the player.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::InputResult;

/// Handle a keyboard event.
///
/// `q`, `Esc` and `Ctrl-C` quit. Raw mode swallows the interrupt signal, so
/// `Ctrl-C` only arrives here as a key.
pub fn handle_key_event(key: KeyEvent) -> InputResult {
    // Windows reports releases too; only act on presses.
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,
        KeyCode::Esc => InputResult::Quit,
        _ => InputResult::Continue,
    }
}
