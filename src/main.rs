//! tcptool entry point.
//!
//! Wires the thin plumbing around the socket session engine and maps the
//! outcome to the process exit status.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse()            -- flag surface (clap exits 2 on usage errors)
//!  └─ FileDefaults::load()    -- optional tcptool.toml defaults
//!  └─ logging init            -- tracing, RUST_LOG overrides the file level
//!  └─ run_session()           -- the fail-fast session pipeline
//!  └─ exit status             -- 0 success, 2 config error, 10–21 session error
//! ```
//!
//! Rust's standard library performs the one-time platform socket-subsystem
//! initialisation implicitly on first socket use; a failure there surfaces
//! through socket creation.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tcptool::cli::Cli;
use tcptool::config::{FileDefaults, DEFAULTS_FILE};
use tcptool::input::console::ConsoleKeySource;
use tcptool::session::run_session;

/// Exit status for configuration errors, distinct from the session-error
/// codes owned by `SessionError::exit_code` and matching clap's own usage
/// errors.
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // First output, before anything that can fail.
    println!("tcptool version {}", env!("CARGO_PKG_VERSION"));

    let defaults = match FileDefaults::load(Path::new(DEFAULTS_FILE)) {
        Ok(defaults) => defaults,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // Structured logging; `RUST_LOG` overrides the defaults-file level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(defaults.log_level.clone())),
        )
        .init();

    let config = match cli.into_config(&defaults) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // Only the client role ever reads keys; the console source is inert
    // until its first read, so the server role never touches the terminal.
    let mut keys = ConsoleKeySource::new();

    match run_session(&config, &mut keys) {
        Ok(_snapshot) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
