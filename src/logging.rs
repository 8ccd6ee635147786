// src/logging.rs

//! Tracing subscriber for the `shellstate` binary.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to every target;
//! 2. `SHELLSTATE_LOG`, read as `EnvFilter` directives
//!    (`debug`, `shellstate::exec=trace,warn`, ...);
//! 3. `info`.
//!
//! Everything goes to stderr. Stdout is reserved for the state document.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SHELLSTATE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV).ok().as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing log subscriber")
}

fn build_filter(cli_level: Option<LogLevel>, env_directives: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }
    match env_directives.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|err| {
            // No subscriber yet, so this is the only place the problem can go.
            eprintln!("shellstate: ignoring invalid {LOG_ENV}={directives:?}: {err}");
            EnvFilter::new(DEFAULT_DIRECTIVES)
        }),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
