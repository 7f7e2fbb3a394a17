//! Keyboard input plumbing for the interactive client loop.
//!
//! The session engine never touches the console directly; all it consumes is
//! the *signal* a keypress produces: either the reserved cancel code or
//! "any other key", which triggers one payload send.
//!
//! # Testability
//!
//! The [`KeySource`] trait keeps the crossterm console reader
//! ([`console::ConsoleKeySource`]) out of the core so unit and integration
//! tests can inject scripted keys via [`mock::ScriptedKeySource`].

use std::io;

pub mod console;
pub mod mock;

/// A single interactive key signal, as seen by the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySignal {
    /// The reserved cancel code (Esc or Ctrl-C); terminates the client loop
    /// normally.
    Cancel,
    /// Any other key; triggers exactly one payload send.
    Send,
}

/// Trait abstracting blocking key-event production.
///
/// The production implementation reads console key events; tests use
/// [`mock::ScriptedKeySource`].
pub trait KeySource {
    /// Blocks until one key is pressed and returns its signal.
    fn next_key(&mut self) -> io::Result<KeySignal>;
}
