//! Connection establishment for both session roles.
//!
//! Drives an already-created raw socket through one of the two state
//! machines:
//!
//! ```text
//! Created ── connect ──────────────────────▶ Connected        (client)
//! Created ── bind ──▶ Bound ── listen ──▶ Listening ── accept ──▶ Accepted  (server)
//! ```
//!
//! Failures short-circuit with the specific [`SessionError`] kind for the
//! step that failed; there is no retry and no timeout on any call.

use std::net::{Ipv4Addr, SocketAddrV4};

use socket2::{SockAddr, Socket};
use tracing::{debug, info};

use super::SessionError;

/// Backlog passed to `listen`; SOMAXCONN on the common platforms.
const LISTEN_BACKLOG: i32 = 128;

/// Checks the dotted-quad *shape*: exactly four dot-separated, non-empty,
/// all-digit fields. A cheap first gate; full parsing still follows.
fn is_dotted_quad(addr: &str) -> bool {
    let mut fields = 0;
    for field in addr.split('.') {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        fields += 1;
    }
    fields == 4
}

/// Parses a textual IPv4 address.
///
/// # Errors
///
/// [`SessionError::InvalidAddress`] for any string that is not a
/// well-formed dotted-quad literal — wrong shape, out-of-range octets,
/// leading zeros alike — reported before any network call is made. A pure
/// in-process parse has no platform call to fail, so
/// [`SessionError::AddressTranslation`] stays reserved.
pub fn parse_ipv4(addr: &str) -> Result<Ipv4Addr, SessionError> {
    if !is_dotted_quad(addr) {
        return Err(SessionError::InvalidAddress { addr: addr.to_string() });
    }
    addr.parse::<Ipv4Addr>()
        .map_err(|_| SessionError::InvalidAddress { addr: addr.to_string() })
}

/// Establishes the client role: parses `addr` and issues one blocking
/// connect to `(addr, port)`.
///
/// On success the socket is connected and ready for the send loop; the peer
/// address is returned for reporting.
pub fn establish_client(
    socket: &Socket,
    addr: &str,
    port: u16,
) -> Result<SocketAddrV4, SessionError> {
    let ip = parse_ipv4(addr)?;
    let peer = SocketAddrV4::new(ip, port);
    debug!("connecting to {peer}");
    socket
        .connect(&SockAddr::from(peer))
        .map_err(|source| SessionError::Connect { peer, source })?;
    info!("connected to {peer}.");
    Ok(peer)
}

/// Establishes the server role: binds the wildcard address on `port`, marks
/// the socket passive-listening, and performs exactly one blocking accept.
///
/// Returns the accepted peer socket, which supersedes the listener for the
/// data phase. The accept blocks indefinitely until a peer connects or the
/// process is terminated externally.
pub fn establish_server(socket: &Socket, port: u16) -> Result<Socket, SessionError> {
    let local = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port);
    socket
        .bind(&SockAddr::from(local))
        .map_err(|source| SessionError::Bind { port, source })?;
    socket
        .listen(LISTEN_BACKLOG)
        .map_err(|source| SessionError::Listen { port, source })?;
    info!("listening on port {port}…");

    let (accepted, peer) = socket
        .accept()
        .map_err(|source| SessionError::Accept { source })?;
    match peer.as_socket() {
        Some(addr) => info!("client connected from {addr}."),
        None => info!("client connected."),
    }
    Ok(accepted)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use socket2::{Domain, Protocol, Type};

    fn fresh_socket() -> Socket {
        Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).expect("socket")
    }

    #[test]
    fn test_parse_accepts_valid_dotted_quads() {
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), Ipv4Addr::LOCALHOST);
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            parse_ipv4("255.255.255.255").unwrap(),
            Ipv4Addr::BROADCAST
        );
    }

    #[test]
    fn test_parse_rejects_malformed_literals_as_invalid_address() {
        for addr in ["", "localhost", "1.2.3", "1.2.3.4.5", "1.2..4", "1.2.3.x", "::1", "1.2.3.-4"] {
            let err = parse_ipv4(addr).unwrap_err();
            assert!(
                matches!(err, SessionError::InvalidAddress { .. }),
                "{addr:?} should be InvalidAddress, got {err}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_octets_as_invalid_address() {
        // Well-shaped but not a well-formed IPv4 literal; still the same
        // error kind as a malformed string, not a translation failure.
        for addr in ["256.0.0.1", "1.2.3.999", "00.1.2.3", "1.2.3.04"] {
            let err = parse_ipv4(addr).unwrap_err();
            assert!(
                matches!(err, SessionError::InvalidAddress { .. }),
                "{addr:?} should be InvalidAddress, got {err}"
            );
        }
    }

    #[test]
    fn test_client_establish_fails_before_any_connect_on_bad_address() {
        // A malformed literal must be rejected without touching the network;
        // the socket stays in its created state.
        let socket = fresh_socket();
        let err = establish_client(&socket, "not-an-address", 9000).unwrap_err();
        assert!(matches!(err, SessionError::InvalidAddress { .. }));
        assert!(socket.peer_addr().is_err(), "socket must remain unconnected");
    }

    #[test]
    fn test_server_establish_reports_bind_failure_on_port_in_use() {
        // Occupy an ephemeral port with one listener, then bind it again.
        let first = fresh_socket();
        let bound = establish_listener_on_ephemeral_port(&first);
        let second = fresh_socket();
        let err = establish_server(&second, bound).unwrap_err();
        assert!(matches!(err, SessionError::Bind { port, .. } if port == bound));
    }

    /// Binds and listens on port 0, returning the kernel-assigned port.
    fn establish_listener_on_ephemeral_port(socket: &Socket) -> u16 {
        let local = SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0);
        socket.bind(&SockAddr::from(local)).expect("bind");
        socket.listen(LISTEN_BACKLOG).expect("listen");
        socket
            .local_addr()
            .expect("local_addr")
            .as_socket()
            .expect("inet addr")
            .port()
    }
}
