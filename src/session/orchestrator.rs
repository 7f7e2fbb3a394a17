//! Session orchestration: the fail-fast pipeline tying the engine together.
//!
//! ```text
//! run_session()
//!  └─ socket creation
//!  └─ role dispatch
//!       ├─ Client: establish_client → run_client_loop → dump_options
//!       └─ Server: establish_server → run_server_loop → dump_options(accepted)
//! ```
//!
//! The first failure at any step skips all subsequent steps and propagates
//! upward; `main` maps it to the process exit status. Handles are closed on
//! drop; there is no compensating cleanup beyond that.

use socket2::{Domain, Protocol, Socket, Type};
use tracing::info;

use crate::config::{SessionConfig, SessionRole};
use crate::input::KeySource;

use super::options::{dump_options, SocketOptionSnapshot};
use super::{establish, interact, SessionError};

/// Runs one complete session for `config`, returning the option snapshot
/// taken on whichever handle was active when the loop ended.
///
/// The key source is only consulted in the client role; the server loop
/// ends via peer close or error.
pub fn run_session(
    config: &SessionConfig,
    keys: &mut dyn KeySource,
) -> Result<SocketOptionSnapshot, SessionError> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .map_err(|source| SessionError::SocketCreation { source })?;

    match config.role() {
        SessionRole::Client => {
            let addr = config.connect_addr.as_deref().unwrap_or_default();
            establish::establish_client(&socket, addr, config.port)?;
            let stats = interact::run_client_loop(&mut &socket, keys, config.payload_bytes)?;
            info!(
                "client session complete: {} send(s), {} byte(s)",
                stats.sends, stats.bytes_sent
            );
            dump_options(&socket)
        }
        SessionRole::Server => {
            // The accepted handle supersedes the listener for the data
            // phase; the listener stays open until drop.
            let accepted = establish::establish_server(&socket, config.port)?;
            let stats = interact::run_server_loop(&mut &accepted, config.payload_bytes)?;
            info!(
                "server session complete: {} receive(s), {} byte(s)",
                stats.receives, stats.bytes_received
            );
            dump_options(&accepted)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
