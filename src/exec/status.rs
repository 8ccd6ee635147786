// src/exec/status.rs

//! Exit status normalization.
//!
//! Callers only ever see a plain `i32`:
//! 1. the exit code, when the process exited normally;
//! 2. on Unix, `128 + signal` when it was killed by a signal;
//! 3. otherwise the numeric value of `ERRORLEVEL`, if the environment has one;
//! 4. otherwise `ProcessStatusUnavailable`.

use std::process::ExitStatus;

use tracing::debug;

use crate::errors::{Result, ShellstateError};

/// Environment variable consulted when the platform reports neither an exit
/// code nor a terminating signal.
pub const EXIT_STATUS_ENV: &str = "ERRORLEVEL";

/// Normalize a finished child's status, reading the fallback from the process
/// environment.
pub fn exit_code_of(status: &ExitStatus) -> Result<i32> {
    normalize_exit_status(
        status.code(),
        signal_of(status),
        std::env::var(EXIT_STATUS_ENV).ok(),
    )
}

/// Pure normalization rule; see the module docs for the precedence.
pub fn normalize_exit_status(
    code: Option<i32>,
    signal: Option<i32>,
    fallback: Option<String>,
) -> Result<i32> {
    if let Some(code) = code {
        return Ok(code);
    }
    if let Some(signal) = signal {
        debug!(signal, "process terminated by signal");
        return Ok(128 + signal);
    }
    match fallback {
        Some(raw) => raw.trim().parse::<i32>().map_err(|e| {
            ShellstateError::ProcessStatusUnavailable(format!(
                "{EXIT_STATUS_ENV}={raw:?} is not an integer: {e}"
            ))
        }),
        None => Err(ShellstateError::ProcessStatusUnavailable(format!(
            "no exit code, no signal and {EXIT_STATUS_ENV} is unset"
        ))),
    }
}

#[cfg(unix)]
fn signal_of(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &ExitStatus) -> Option<i32> {
    None
}
