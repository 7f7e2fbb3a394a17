//! Console key source backed by crossterm.
//!
//! Raw mode is enabled only for the duration of a single blocking read, so
//! log lines printed between keypresses render normally and a server-role
//! process (which never reads keys) leaves the terminal untouched.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::debug;

use super::{KeySignal, KeySource};

/// Production [`KeySource`] reading key events from the controlling
/// terminal.
#[derive(Debug, Default)]
pub struct ConsoleKeySource;

impl ConsoleKeySource {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for ConsoleKeySource {
    fn next_key(&mut self) -> io::Result<KeySignal> {
        terminal::enable_raw_mode()?;
        let signal = loop {
            // Key releases and non-key events (resize, focus) are not
            // signals; keep blocking until an actual press arrives.
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    break Ok(classify(key.code, key.modifiers));
                }
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        // Best-effort restore: a failed read must propagate, not be
        // shadowed by a restore error.
        if let Err(e) = terminal::disable_raw_mode() {
            debug!("failed to restore terminal mode: {e}");
        }
        signal
    }
}

/// Maps a pressed key to its session signal. Esc and Ctrl-C are the
/// reserved cancel codes; everything else requests a send.
fn classify(code: KeyCode, modifiers: KeyModifiers) -> KeySignal {
    match code {
        KeyCode::Esc => KeySignal::Cancel,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeySignal::Cancel,
        _ => KeySignal::Send,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_is_the_cancel_code() {
        assert_eq!(classify(KeyCode::Esc, KeyModifiers::NONE), KeySignal::Cancel);
    }

    #[test]
    fn test_ctrl_c_is_the_cancel_code() {
        assert_eq!(
            classify(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeySignal::Cancel
        );
    }

    #[test]
    fn test_plain_c_requests_a_send() {
        assert_eq!(
            classify(KeyCode::Char('c'), KeyModifiers::NONE),
            KeySignal::Send
        );
    }

    #[test]
    fn test_ordinary_keys_request_a_send() {
        assert_eq!(classify(KeyCode::Char('a'), KeyModifiers::NONE), KeySignal::Send);
        assert_eq!(classify(KeyCode::Enter, KeyModifiers::NONE), KeySignal::Send);
        assert_eq!(classify(KeyCode::F(5), KeyModifiers::NONE), KeySignal::Send);
    }
}
