//! Terminal mode control and the interactive clock.
//!
//! [`TerminalGuard`] puts the terminal into raw mode with a hidden cursor and
//! undoes it on drop. [`InteractiveClock`] is the real-time [`Clock`] used
//! during playback: its waits end early on a quit key or a termination
//! signal.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use signal_hook::SigId;

use crate::player::input::handle_event;
use crate::player::pacing::{Clock, Wake};
use crate::player::state::InputResult;

/// Upper bound on one blocking poll, so signals are noticed promptly.
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Raw mode and a hidden cursor for as long as the guard lives.
///
/// Dropping the guard resets attributes, shows the cursor and leaves raw
/// mode. Restoration is best-effort: errors on the way out are logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode, hide the cursor and clear the screen once.
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Construct first so a failure below still restores raw mode.
        let guard = Self { _private: () };
        execute!(io::stdout(), Hide, Clear(ClearType::All))?;
        tracing::debug!("terminal switched to raw mode");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let restored = queue!(stdout, SetAttribute(Attribute::Reset), Show)
            .and_then(|_| stdout.flush())
            .and_then(|_| terminal::disable_raw_mode());
        match restored {
            Ok(()) => tracing::debug!("terminal restored"),
            Err(e) => tracing::warn!(error = %e, "failed to restore terminal"),
        }
    }
}

/// Wall-clock time with waits that can be cancelled.
///
/// Termination signals are always watched. Key events are only read when
/// `keys` is enabled, which requires stdin to be a terminal.
pub struct InteractiveClock {
    cancelled: Arc<AtomicBool>,
    signals: Vec<SigId>,
    keys: bool,
}

impl InteractiveClock {
    /// Register the termination signal handlers.
    pub fn new(keys: bool) -> io::Result<Self> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut signals = Vec::new();
        for &signal in termination_signals() {
            signals.push(signal_hook::flag::register(signal, Arc::clone(&cancelled))?);
        }
        Ok(Self {
            cancelled,
            signals,
            keys,
        })
    }

    fn signalled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Wait up to `timeout` for a key event. Returns true on a quit key.
    fn poll_keys(&mut self, timeout: Duration) -> bool {
        match event::poll(timeout) {
            Ok(true) => self.drain_events(),
            Ok(false) => false,
            Err(e) => {
                self.disable_keys(e);
                false
            }
        }
    }

    /// Consume every pending event. Returns true if any of them quits.
    fn drain_events(&mut self) -> bool {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    self.disable_keys(e);
                    return false;
                }
            };
            if handle_event(event) == InputResult::Quit {
                tracing::debug!("quit key pressed");
                self.cancelled.store(true, Ordering::Relaxed);
                return true;
            }
            match event::poll(Duration::ZERO) {
                Ok(true) => continue,
                Ok(false) => return false,
                Err(e) => {
                    self.disable_keys(e);
                    return false;
                }
            }
        }
    }

    fn disable_keys(&mut self, error: io::Error) {
        tracing::debug!(error = %error, "reading terminal events failed, keys disabled");
        self.keys = false;
    }
}

impl Clock for InteractiveClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) -> Wake {
        let deadline = Instant::now() + duration;
        loop {
            if self.signalled() {
                return Wake::Cancelled;
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Wake::Elapsed;
            }
            let slice = left.min(POLL_SLICE);
            if self.keys {
                if self.poll_keys(slice) {
                    return Wake::Cancelled;
                }
            } else {
                thread::sleep(slice);
            }
        }
    }

    fn poll_cancel(&mut self) -> bool {
        if self.signalled() {
            return true;
        }
        self.keys && self.poll_keys(Duration::ZERO)
    }
}

impl Drop for InteractiveClock {
    fn drop(&mut self) {
        for id in self.signals.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

#[cfg(unix)]
fn termination_signals() -> &'static [i32] {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    &[SIGINT, SIGTERM, SIGHUP]
}

#[cfg(not(unix))]
fn termination_signals() -> &'static [i32] {
    use signal_hook::consts::{SIGINT, SIGTERM};
    &[SIGINT, SIGTERM]
}
