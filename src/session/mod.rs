//! The socket session engine.
//!
//! # Sub-modules
//!
//! - **`establish`** – drives a raw socket through connection establishment:
//!   active connect for the client role, bind/listen/accept for the server
//!   role.
//!
//! - **`interact`** – the interactive data phase: send-on-keypress for the
//!   client, receive-until-close for the server.
//!
//! - **`options`** – read-only introspection of the negotiated socket
//!   receive/send buffer sizes.
//!
//! - **`orchestrator`** – sequences socket creation, establishment, the
//!   loop, and the option report, fail-fast.
//!
//! Every operation returns a specific [`SessionError`] kind; the first
//! failure aborts the remaining pipeline and becomes the process exit
//! status via [`SessionError::exit_code`].

use std::fmt;
use std::io;
use std::net::SocketAddrV4;

use thiserror::Error;

pub mod establish;
pub mod interact;
pub mod options;
pub mod orchestrator;

pub use interact::{ClientLoopStats, ServerLoopStats};
pub use options::SocketOptionSnapshot;
pub use orchestrator::run_session;

/// Which buffer-size option a query failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketOption {
    Receive,
    Send,
}

impl fmt::Display for SocketOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketOption::Receive => f.write_str("receive"),
            SocketOption::Send => f.write_str("send"),
        }
    }
}

/// Error type for every socket session operation.
///
/// Variants map one-to-one onto the pipeline steps so a failure always
/// identifies the step that produced it. Where a platform call failed, the
/// underlying [`io::Error`] is carried as the source.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The platform socket subsystem is unavailable. Reserved: Rust's
    /// standard library initialises the subsystem implicitly on first use
    /// and surfaces a failure through socket creation instead.
    #[error("socket subsystem unavailable: {0}")]
    SubsystemInit(String),

    /// The platform could not allocate a TCP socket.
    #[error("failed to create TCP socket: {source}")]
    SocketCreation {
        #[source]
        source: io::Error,
    },

    /// The connect address is not a well-formed IPv4 dotted-quad literal.
    #[error("invalid IPv4 address: {addr:?}")]
    InvalidAddress { addr: String },

    /// The address could not be translated by an underlying platform call.
    /// Reserved: the in-process parse classifies every ill-formed literal
    /// as [`SessionError::InvalidAddress`] and makes no platform call that
    /// could fail separately.
    #[error("failed to translate address {addr:?}: {source}")]
    AddressTranslation {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The active connect was refused, unreachable, or otherwise errored.
    #[error("failed to connect to {peer}: {source}")]
    Connect {
        peer: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    /// The listen port could not be bound (typically already in use).
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The bound socket could not be marked passive-listening.
    #[error("failed to listen on port {port}: {source}")]
    Listen {
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The blocking accept errored before a peer connected.
    #[error("accept failed: {source}")]
    Accept {
        #[source]
        source: io::Error,
    },

    /// A payload send on the connected socket failed.
    #[error("send failed after {sends} completed send(s): {source}")]
    Send {
        sends: u64,
        #[source]
        source: io::Error,
    },

    /// A receive on the accepted socket failed. A zero-length receive is
    /// *not* this error; it is the normal orderly-close signal.
    #[error("receive failed after {receives} completed receive(s): {source}")]
    Receive {
        receives: u64,
        #[source]
        source: io::Error,
    },

    /// Querying one of the two buffer-size options failed.
    #[error("failed to query {option} buffer size: {source}")]
    OptionQuery {
        option: SocketOption,
        #[source]
        source: io::Error,
    },

    /// The console key read failed; the client loop cannot continue.
    #[error("failed to read key event: {source}")]
    KeyRead {
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// Stable process exit status for each failure kind.
    ///
    /// Zero is reserved for full success and 2 for configuration errors
    /// (mapped in `main`); session failures occupy 10–21 so the two error
    /// domains stay distinguishable.
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionError::SubsystemInit(_) => 10,
            SessionError::SocketCreation { .. } => 11,
            SessionError::InvalidAddress { .. } => 12,
            SessionError::AddressTranslation { .. } => 13,
            SessionError::Connect { .. } => 14,
            SessionError::Bind { .. } => 15,
            SessionError::Listen { .. } => 16,
            SessionError::Accept { .. } => 17,
            SessionError::Send { .. } => 18,
            SessionError::Receive { .. } => 19,
            SessionError::OptionQuery { .. } => 20,
            SessionError::KeyRead { .. } => 21,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
