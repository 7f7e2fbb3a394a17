//! Read-only introspection of the negotiated socket buffer sizes.

use socket2::Socket;
use tracing::debug;

use super::{SessionError, SocketOption};

/// Snapshot of the socket's transport buffer configuration, valid only
/// while the queried handle is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketOptionSnapshot {
    pub recv_buffer_bytes: usize,
    pub send_buffer_bytes: usize,
}

/// Queries the receive and send buffer sizes of `socket` and prints a
/// labeled report. Never mutates socket configuration.
///
/// # Errors
///
/// [`SessionError::OptionQuery`] identifying which of the two queries
/// failed.
pub fn dump_options(socket: &Socket) -> Result<SocketOptionSnapshot, SessionError> {
    let recv_buffer_bytes = socket
        .recv_buffer_size()
        .map_err(|source| SessionError::OptionQuery {
            option: SocketOption::Receive,
            source,
        })?;
    let send_buffer_bytes = socket
        .send_buffer_size()
        .map_err(|source| SessionError::OptionQuery {
            option: SocketOption::Send,
            source,
        })?;
    debug!("queried socket options: rcvbuf={recv_buffer_bytes} sndbuf={send_buffer_bytes}");

    println!("socket options:");
    println!("  receive buffer: {recv_buffer_bytes} bytes");
    println!("  send buffer:    {send_buffer_bytes} bytes");

    Ok(SocketOptionSnapshot {
        recv_buffer_bytes,
        send_buffer_bytes,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
