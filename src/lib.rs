//! # tcptool
//!
//! A manual diagnostic utility for exercising raw TCP connectivity. It runs
//! as either a client that connects to a given address/port or a server that
//! listens and accepts exactly one connection, exchanges raw bytes
//! interactively, and reports the negotiated socket buffer sizes on the way
//! out.
//!
//! The crate is split into thin plumbing and the socket session engine:
//!
//! - **`cli`** – the command-line flag surface (`-c/--connect`, `-p/--port`).
//!   Produces a validated [`SessionConfig`] and nothing else.
//!
//! - **`config`** – the immutable-after-parse configuration value object,
//!   role derivation, and the optional `tcptool.toml` defaults file.
//!
//! - **`input`** – keyboard plumbing. Only the *signal* matters to the
//!   session engine: one key pressed, or the reserved cancel code. The
//!   [`input::KeySource`] trait keeps the console reader out of the core so
//!   tests can inject scripted keys.
//!
//! - **`session`** – the engine itself: connection establishment for both
//!   roles, the interactive send/receive loops, the socket option
//!   inspector, and the orchestrator that sequences them fail-fast.

pub mod cli;
pub mod config;
pub mod input;
pub mod session;

// Re-export the most-used types at the crate root so callers can write
// `tcptool::SessionConfig` instead of `tcptool::config::SessionConfig`.
pub use config::{ConfigError, FileDefaults, SessionConfig, SessionRole};
pub use session::options::SocketOptionSnapshot;
pub use session::SessionError;
