// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the apply/check/destroy
//! commands, using `tokio::process::Command`, and handing the captured stdout
//! and exit status back to the reconciliation engine.
//!
//! - [`command`] turns a shell spec plus a command template into an argv.
//! - [`runner`] spawns the argv, feeds stdin and drains stdout/stderr
//!   concurrently.
//! - [`status`] normalizes an `ExitStatus` into a plain integer.
//! - [`backend`] provides the `CommandBackend` trait and a concrete
//!   `RealCommandBackend` that the engine uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod command;
pub mod runner;
pub mod status;

pub use backend::{CommandBackend, RealCommandBackend};
pub use command::{build_argv, default_shell};
pub use runner::{run_command, CommandOutput};
