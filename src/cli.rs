//! Command-line surface.
//!
//! A fixed set of flags mapped onto the [`SessionConfig`] value object; no
//! state lives here. Flag presence drives role selection:
//!
//! - `-c/--connect <ADDR>` – target IPv4 address; presence selects the
//!   client role.
//! - `-p/--port <PORT>` – connect target port, or listen port when no
//!   address is given (then it must be non-zero).
//!
//! Values absent from the command line fall back to the `tcptool.toml`
//! defaults file before validation.

use clap::Parser;

use crate::config::{ConfigError, FileDefaults, SessionConfig};

/// Manual TCP connectivity diagnostic.
#[derive(Debug, Parser)]
#[command(name = "tcptool", version, about)]
pub struct Cli {
    /// Target IPv4 address to connect to (selects the client role).
    #[arg(short = 'c', long = "connect", value_name = "ADDR")]
    pub connect: Option<String>,

    /// TCP port to connect to, or to listen on when no address is given.
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Bytes per client send (also the server receive buffer size).
    #[arg(long = "payload-bytes", value_name = "BYTES")]
    pub payload_bytes: Option<usize>,
}

impl Cli {
    /// Resolves flags against the defaults file and validates the result.
    pub fn into_config(self, defaults: &FileDefaults) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(
            self.connect,
            self.port.or(defaults.port).unwrap_or(0),
            self.payload_bytes.unwrap_or(defaults.payload_bytes),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionRole, DEFAULT_PAYLOAD_BYTES};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("args should parse")
    }

    #[test]
    fn test_connect_and_port_flags_build_client_config() {
        let cli = parse(&["tcptool", "-c", "10.0.0.1", "-p", "9000"]);
        let cfg = cli.into_config(&FileDefaults::default()).unwrap();
        assert_eq!(cfg.role(), SessionRole::Client);
        assert_eq!(cfg.connect_addr.as_deref(), Some("10.0.0.1"));
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.payload_bytes, DEFAULT_PAYLOAD_BYTES);
    }

    #[test]
    fn test_long_flags_are_equivalent() {
        let cli = parse(&["tcptool", "--connect", "10.0.0.1", "--port", "9000"]);
        let cfg = cli.into_config(&FileDefaults::default()).unwrap();
        assert_eq!(cfg.role(), SessionRole::Client);
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn test_port_alone_builds_server_config() {
        let cli = parse(&["tcptool", "-p", "9000"]);
        let cfg = cli.into_config(&FileDefaults::default()).unwrap();
        assert_eq!(cfg.role(), SessionRole::Server);
    }

    #[test]
    fn test_no_flags_fails_with_port_required() {
        let cli = parse(&["tcptool"]);
        let result = cli.into_config(&FileDefaults::default());
        assert!(matches!(result, Err(ConfigError::PortRequired)));
    }

    #[test]
    fn test_defaults_file_supplies_missing_port() {
        let cli = parse(&["tcptool"]);
        let defaults = FileDefaults {
            port: Some(9000),
            ..FileDefaults::default()
        };
        let cfg = cli.into_config(&defaults).unwrap();
        assert_eq!(cfg.role(), SessionRole::Server);
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn test_flag_overrides_defaults_file() {
        let cli = parse(&["tcptool", "-p", "8000", "--payload-bytes", "512"]);
        let defaults = FileDefaults {
            port: Some(9000),
            payload_bytes: 4096,
            ..FileDefaults::default()
        };
        let cfg = cli.into_config(&defaults).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.payload_bytes, 512);
    }

    #[test]
    fn test_non_numeric_port_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["tcptool", "-p", "not-a-port"]);
        assert!(result.is_err());
    }
}
