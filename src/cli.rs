// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `shellstate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shellstate",
    version,
    about = "Manage a resource through apply/check/destroy shell commands.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the resource manifest (TOML).
    #[arg(long, value_name = "PATH", default_value = "Shellstate.toml")]
    pub manifest: String,

    /// Resource to operate on. May be omitted if the manifest has only one.
    #[arg(long, value_name = "NAME")]
    pub resource: Option<String>,

    /// Prior state (JSON, as printed by an earlier run).
    ///
    /// Without it the resource is treated as never applied. The new state is
    /// always printed to stdout; nothing is written back to this file.
    #[arg(long, value_name = "PATH")]
    pub state: Option<String>,

    /// Seed for identity generation, for reproducible ids.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHELLSTATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub action: Action,
}

/// What to do with the selected resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Run apply, then check.
    Apply,
    /// Run check only.
    Check,
    /// Run destroy (if configured) and forget the resource.
    Destroy,
    /// Print the action a reconcile would take, without running anything.
    Plan,
    /// Check, plan, then apply or replace as needed.
    Reconcile,
    /// Parse + validate the manifest and print the resource, no execution.
    Show,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
