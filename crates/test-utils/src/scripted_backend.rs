use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use shellstate::errors::{Result, ShellstateError};
use shellstate::exec::{CommandBackend, CommandOutput};

/// One recorded call to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub input: Vec<u8>,
}

impl Invocation {
    /// The command template, i.e. the last argv element.
    pub fn command(&self) -> &str {
        self.argv.last().map(String::as_str).unwrap_or_default()
    }

    pub fn input_str(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    LaunchFailure,
}

/// A fake backend that:
/// - records every argv/stdin pair it is asked to run
/// - answers from per-command reply queues instead of spawning processes.
///
/// Replies are keyed by command template. The last reply queued for a
/// command is sticky: it keeps being returned once the queue runs dry.
/// Unscripted commands succeed with exit status 0 and no output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<HashMap<String, VecDeque<Reply>>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `command`.
    pub fn reply(self, command: &str, exit_code: i32, stdout: &str) -> Self {
        self.push(
            command,
            Reply::Output(CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                exit_code,
            }),
        );
        self
    }

    /// Queue a launch failure for `command`.
    pub fn fail_launch(self, command: &str) -> Self {
        self.push(command, Reply::LaunchFailure);
        self
    }

    /// Queue a reply on a backend already handed to a reconciler.
    pub fn push_reply(&self, command: &str, exit_code: i32, stdout: &str) {
        self.push(
            command,
            Reply::Output(CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                exit_code,
            }),
        );
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn commands_run(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|i| i.command().to_string())
            .collect()
    }

    fn push(&self, command: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, command: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(command) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::Output(CommandOutput {
                stdout: Vec::new(),
                exit_code: 0,
            }),
        }
    }
}

impl CommandBackend for ScriptedBackend {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        input: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            let invocation = Invocation {
                argv: argv.to_vec(),
                input: input.to_vec(),
            };
            let command = invocation.command().to_string();
            self.invocations.lock().unwrap().push(invocation);

            match self.next_reply(&command) {
                Reply::Output(output) => Ok(output),
                Reply::LaunchFailure => Err(ShellstateError::ProcessLaunchFailed {
                    program: argv.first().cloned().unwrap_or_default(),
                    source: io::Error::new(io::ErrorKind::NotFound, "scripted launch failure"),
                }),
            }
        })
    }
}
