// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! The reconciliation engine talks to a `CommandBackend` instead of spawning
//! processes itself. This makes it easy to swap in a scripted fake in tests
//! while keeping the production implementation in [`runner`].
//!
//! - `RealCommandBackend` is the default implementation used by `shellstate`.
//!   It just forwards to [`run_command`].
//! - Tests can provide their own `CommandBackend` that, for example, records
//!   which argv/stdin pairs were requested and replies with canned output.
//!
//! [`runner`]: super::runner

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::runner::{run_command, CommandOutput};

/// Trait abstracting how a single command is executed.
///
/// Production code uses [`RealCommandBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait CommandBackend: Send + Sync {
    /// Run `argv` with `input` on stdin and report captured stdout plus the
    /// normalized exit status.
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        input: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>>;
}

/// Real backend used in production: one OS process per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandBackend;

impl CommandBackend for RealCommandBackend {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        input: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(run_command(argv, input))
    }
}
