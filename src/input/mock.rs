//! Scripted key source for unit testing.
//!
//! Allows tests to drive the client loop with a fixed key sequence without a
//! terminal attached.

use std::collections::VecDeque;
use std::io;

use super::{KeySignal, KeySource};

/// A [`KeySource`] that replays a fixed sequence of signals.
///
/// Once the script is exhausted it keeps returning [`KeySignal::Cancel`], so
/// a loop under test always terminates.
#[derive(Debug, Default)]
pub struct ScriptedKeySource {
    script: VecDeque<KeySignal>,
    /// When set, the next read fails with this error instead.
    fail_next: Option<io::ErrorKind>,
}

impl ScriptedKeySource {
    /// Creates a source that replays `script` in order.
    pub fn new(script: impl IntoIterator<Item = KeySignal>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fail_next: None,
        }
    }

    /// Creates a source whose first read fails, for exercising the key-read
    /// error path.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            script: VecDeque::new(),
            fail_next: Some(kind),
        }
    }

    /// Number of scripted signals not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn next_key(&mut self) -> io::Result<KeySignal> {
        if let Some(kind) = self.fail_next.take() {
            return Err(io::Error::new(kind, "scripted key-read failure"));
        }
        Ok(self.script.pop_front().unwrap_or(KeySignal::Cancel))
    }
}
