//! Session configuration: the value object the rest of the tool runs on.
//!
//! The configuration is constructed exactly once (from the CLI surface plus
//! the optional `tcptool.toml` defaults file), validated, and then passed by
//! reference into the orchestrator and establisher. There is no global
//! mutable options object.
//!
//! # Defaults file
//!
//! If a `tcptool.toml` exists in the working directory it supplies defaults
//! that individual flags override:
//!
//! ```toml
//! payload_bytes = 4096
//! port = 9000
//! log_level = "info"
//! ```
//!
//! Fields annotated with `#[serde(default = "…")]` fall back to built-in
//! values when absent, so a partial (or missing) file works on first run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the optional defaults file, looked up in the working directory.
pub const DEFAULTS_FILE: &str = "tcptool.toml";

/// Payload size used by the client loop when neither the flag nor the
/// defaults file specifies one.
pub const DEFAULT_PAYLOAD_BYTES: usize = 4096;

/// Error type for configuration construction and the defaults file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a connect address nor a non-zero port was supplied.
    #[error("port required to listen")]
    PortRequired,

    /// A zero payload size would make the client loop a no-op.
    #[error("payload size must be non-zero")]
    ZeroPayload,

    /// A file system I/O error occurred reading the defaults file.
    #[error("I/O error reading defaults at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The defaults file TOML could not be parsed.
    #[error("failed to parse defaults TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Defaults loaded from `tcptool.toml`, all overridable from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileDefaults {
    /// Size in bytes of each client send and of the server receive buffer.
    #[serde(default = "default_payload_bytes")]
    pub payload_bytes: usize,
    /// Default port when `-p/--port` is not given.
    #[serde(default)]
    pub port: Option<u16>,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_payload_bytes() -> usize {
    DEFAULT_PAYLOAD_BYTES
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FileDefaults {
    fn default() -> Self {
        Self {
            payload_bytes: default_payload_bytes(),
            port: None,
            log_level: default_log_level(),
        }
    }
}

impl FileDefaults {
    /// Loads defaults from `path`, returning built-in defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

/// The role a session runs in, derived from the configuration, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// Actively connects outward to the configured address/port.
    Client,
    /// Passively binds the configured port, listens, and accepts one peer.
    Server,
}

/// Immutable session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Target IPv4 address as written on the command line. Presence selects
    /// the client role.
    pub connect_addr: Option<String>,
    /// Connect target port (client) or listen port (server).
    pub port: u16,
    /// Size in bytes of each client send / the server receive buffer.
    pub payload_bytes: usize,
}

impl SessionConfig {
    /// Builds and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PortRequired`] when no connect address is
    /// given and the port is zero (nothing to listen on), and
    /// [`ConfigError::ZeroPayload`] for a zero payload size. A client with
    /// port zero is deliberately let through: the connect attempt surfaces
    /// the failure as a socket error, matching the fail-fast pipeline.
    pub fn new(
        connect_addr: Option<String>,
        port: u16,
        payload_bytes: usize,
    ) -> Result<Self, ConfigError> {
        if connect_addr.is_none() && port == 0 {
            return Err(ConfigError::PortRequired);
        }
        if payload_bytes == 0 {
            return Err(ConfigError::ZeroPayload);
        }
        Ok(Self {
            connect_addr,
            port,
            payload_bytes,
        })
    }

    /// Derives the session role: `Client` iff a connect address is present.
    pub fn role(&self) -> SessionRole {
        if self.connect_addr.is_some() {
            SessionRole::Client
        } else {
            SessionRole::Server
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
