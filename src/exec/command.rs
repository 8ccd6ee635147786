// src/exec/command.rs

use crate::errors::{Result, ShellstateError};

/// Default shell spec for the host OS.
pub fn default_shell() -> &'static str {
    if std::env::consts::OS == "windows" {
        "cmd /C"
    } else {
        "/bin/sh -c"
    }
}

/// Split a shell spec on whitespace into its argument prefix.
///
/// No quoting is supported; an argument containing spaces has to live in the
/// command template instead.
pub fn split_shell(shell: &str) -> Result<Vec<String>> {
    let args: Vec<String> = shell.split_whitespace().map(str::to_string).collect();
    if args.is_empty() {
        return Err(ShellstateError::ConfigError(
            "shell must name at least an interpreter (got an empty string)".to_string(),
        ));
    }
    Ok(args)
}

/// Build the argv for one command: `shell args + [template]`.
///
/// An empty template is allowed and passed through as an empty final argument.
pub fn build_argv(shell: &[String], template: &str) -> Result<Vec<String>> {
    if shell.is_empty() {
        return Err(ShellstateError::ConfigError(
            "cannot build a command without a shell".to_string(),
        ));
    }
    let mut argv = Vec::with_capacity(shell.len() + 1);
    argv.extend(shell.iter().cloned());
    argv.push(template.to_string());
    Ok(argv)
}
