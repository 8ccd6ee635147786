// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::codec::DecodeError;
use crate::types::Phase;

#[derive(Error, Debug)]
pub enum ShellstateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to launch '{program}': {source}")]
    ProcessLaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Exit status unavailable: {0}")]
    ProcessStatusUnavailable(String),

    #[error("{phase} command exited with status {exit_code}")]
    CommandFailed { phase: Phase, exit_code: i32 },

    #[error("Failed to decode {phase} output: {source}")]
    OutputDecodeFailed {
        phase: Phase,
        #[source]
        source: DecodeError,
    },

    #[error("Resource not found in manifest: {0}")]
    UnknownResource(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ShellstateError>;
