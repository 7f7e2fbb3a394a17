//! The interactive data phase: two mutually exclusive loops keyed by role.
//!
//! Both loops are strictly synchronous and drive exactly one connection.
//! The payload is an undifferentiated byte stream; there is no framing and
//! no interpretation of received content.
//!
//! The loops are generic over [`std::io::Write`] / [`std::io::Read`] so
//! tests exercise them with in-memory sinks and cursors; production passes
//! the connected socket.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::input::{KeySignal, KeySource};

use super::SessionError;

/// Counters kept by the client loop, reported at session end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientLoopStats {
    /// Completed payload sends.
    pub sends: u64,
    /// Total bytes handed to the transport.
    pub bytes_sent: u64,
}

/// Counters kept by the server loop, reported at session end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerLoopStats {
    /// Completed non-zero receives.
    pub receives: u64,
    /// Total bytes drained from the connection.
    pub bytes_received: u64,
}

/// Client loop: block on one key, send one payload, repeat.
///
/// The reserved cancel code terminates the loop normally with the stats so
/// far; any other key performs exactly one full send of `payload_bytes`
/// zero-filled bytes. There is no upper bound on iterations.
///
/// # Errors
///
/// [`SessionError::KeyRead`] if the key source fails,
/// [`SessionError::Send`] if a send fails; both abort the loop.
pub fn run_client_loop<W: Write>(
    writer: &mut W,
    keys: &mut dyn KeySource,
    payload_bytes: usize,
) -> Result<ClientLoopStats, SessionError> {
    // Deterministic zero fill; the peer discards content anyway.
    let payload = vec![0u8; payload_bytes];
    let mut stats = ClientLoopStats::default();

    println!("press any key to send {payload_bytes} bytes, Esc to quit");
    loop {
        let signal = keys
            .next_key()
            .map_err(|source| SessionError::KeyRead { source })?;
        match signal {
            KeySignal::Cancel => {
                info!(
                    "cancel received; session ends after {} send(s), {} byte(s)",
                    stats.sends, stats.bytes_sent
                );
                return Ok(stats);
            }
            KeySignal::Send => {
                writer
                    .write_all(&payload)
                    .map_err(|source| SessionError::Send {
                        sends: stats.sends,
                        source,
                    })?;
                stats.sends += 1;
                stats.bytes_sent += payload_bytes as u64;
                debug!("sent {payload_bytes} bytes (total {})", stats.bytes_sent);
            }
        }
    }
}

/// Server loop: drain the accepted connection until orderly close.
///
/// Repeatedly performs a blocking receive of up to `buffer_bytes`. A
/// zero-length receive signals the peer closed in an orderly fashion and
/// terminates the loop normally; it is explicitly *not* an error. Received
/// bytes are discarded.
///
/// # Errors
///
/// [`SessionError::Receive`] if a receive fails.
pub fn run_server_loop<R: Read>(
    reader: &mut R,
    buffer_bytes: usize,
) -> Result<ServerLoopStats, SessionError> {
    let mut buf = vec![0u8; buffer_bytes];
    let mut stats = ServerLoopStats::default();

    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|source| SessionError::Receive {
                receives: stats.receives,
                source,
            })?;
        if n == 0 {
            info!(
                "peer closed the connection; {} receive(s), {} byte(s) drained",
                stats.receives, stats.bytes_received
            );
            return Ok(stats);
        }
        stats.receives += 1;
        stats.bytes_received += n as u64;
        debug!("received {n} bytes (total {})", stats.bytes_received);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
