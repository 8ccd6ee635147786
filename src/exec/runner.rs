// src/exec/runner.rs

//! Single command process runner.
//!
//! All three pipes are set up before the child starts. Once it is running,
//! three Tokio tasks work concurrently:
//!
//! - the stdin writer pushes the encoded input and then closes stdin, so the
//!   child sees end-of-input even when there is nothing to send;
//! - the stdout reader forwards every line to the aggregator and the log;
//! - the stderr reader only logs.
//!
//! Both readers report back over one fan-in channel and send a `Closed` marker
//! when their stream hits EOF. The caller collects stdout until both markers
//! arrived and only then waits for the exit status. Neither pipe can fill up
//! while the other one is being read, so a chatty child never deadlocks us.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::errors::{Result, ShellstateError};
use crate::exec::status::exit_code_of;

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured stdout, one `\n` after each line received.
    pub stdout: Vec<u8>,
    /// Normalized exit status. Non-zero is data, not an error.
    pub exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn as_str(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

#[derive(Debug)]
enum StreamEvent {
    Line(Vec<u8>),
    Closed(Stream),
}

/// Run `argv` to completion with `input` on stdin.
///
/// Blocks (asynchronously) until both output streams reached EOF and the
/// process exited. There is no timeout: a child that never exits keeps this
/// future pending. Dropping the future kills the child.
pub async fn run_command(argv: &[String], input: &[u8]) -> Result<CommandOutput> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        ShellstateError::ConfigError("cannot run an empty command line".to_string())
    })?;

    debug!(command = %argv.join(" "), input_bytes = input.len(), "running command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ShellstateError::ProcessLaunchFailed {
            program: program.clone(),
            source,
        })?;

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| missing_pipe(program, "stdin"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| missing_pipe(program, "stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| missing_pipe(program, "stderr"))?;

    let writer = tokio::spawn(write_stdin(stdin, input.to_vec()));

    let (tx, mut rx) = mpsc::channel::<StreamEvent>(64);
    tokio::spawn(drain_stream(stdout, Stream::Stdout, tx.clone()));
    tokio::spawn(drain_stream(stderr, Stream::Stderr, tx));

    let mut captured = Vec::new();
    let mut open_streams = 2;
    while open_streams > 0 {
        match rx.recv().await {
            Some(StreamEvent::Line(line)) => {
                captured.extend_from_slice(&line);
                captured.push(b'\n');
            }
            Some(StreamEvent::Closed(stream)) => {
                trace!(stream = stream.as_str(), "stream closed");
                open_streams -= 1;
            }
            // Both reader tasks are gone; nothing more can arrive.
            None => break,
        }
    }

    let status = child.wait().await?;
    if let Err(err) = writer.await {
        warn!(error = %err, "stdin writer task did not finish cleanly");
    }

    let exit_code = exit_code_of(&status)?;
    info!(
        program = %program,
        exit_code,
        stdout_bytes = captured.len(),
        "command exited"
    );

    Ok(CommandOutput {
        stdout: captured,
        exit_code,
    })
}

fn missing_pipe(program: &str, pipe: &str) -> ShellstateError {
    ShellstateError::ProcessLaunchFailed {
        program: program.to_string(),
        source: io::Error::other(format!("{pipe} was not captured")),
    }
}

async fn write_stdin(mut stdin: ChildStdin, input: Vec<u8>) {
    if !input.is_empty() {
        // A child that exits without reading its input is not our problem.
        if let Err(err) = stdin.write_all(&input).await {
            warn!(error = %err, "error writing to stdin");
        }
    }
    // `stdin` is dropped here, which closes the pipe.
}

async fn drain_stream<R>(reader: R, stream: Stream, tx: mpsc::Sender<StreamEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(reader).split(b'\n');

    loop {
        match segments.next_segment().await {
            Ok(Some(mut line)) => {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                debug!(stream = stream.as_str(), "{}", String::from_utf8_lossy(&line));
                if stream == Stream::Stdout && tx.send(StreamEvent::Line(line)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(stream = stream.as_str(), error = %err, "error reading from child");
                break;
            }
        }
    }

    let _ = tx.send(StreamEvent::Closed(stream)).await;
}
