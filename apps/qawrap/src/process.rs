//! Bounded subprocess execution.
//!
//! Runs one command with captured stdout/stderr and waits at most
//! `timeout`. A timeout or a failed spawn is reported in the outcome rather
//! than as an error, so callers can turn it into an exit code or a failing
//! check.

use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        ProcessSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The literal invocation, for traceability.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exit code; `-1` when terminated by a signal.
    Exited(i32),
    TimedOut,
    /// The program does not exist.
    NotFound,
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub completion: Completion,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn exit_code(&self) -> Option<i32> {
        match self.completion {
            Completion::Exited(code) => Some(code),
            _ => None,
        }
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            if let Err(e) = p.read_to_end(&mut buf) {
                warn!(error = %e, bytes = buf.len(), "pipe read failed; output truncated");
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Run `spec` to completion or until its timeout elapses.
pub fn run(spec: &ProcessSpec) -> ProcessOutcome {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }
    debug!(command = %spec.display(), timeout_ms = spec.timeout.as_millis() as u64, "spawning");

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            let completion = if err.kind() == ErrorKind::NotFound {
                Completion::NotFound
            } else {
                Completion::SpawnFailed(err.to_string())
            };
            return ProcessOutcome {
                completion,
                stdout: String::new(),
                stderr: err.to_string(),
            };
        }
    };

    // Pipes are drained concurrently so a chatty child cannot block on a full
    // pipe while we wait on it.
    let out = drain(child.stdout.take());
    let err = drain(child.stderr.take());

    match child.wait_timeout(spec.timeout) {
        Ok(Some(status)) => {
            let code = status.code().unwrap_or(-1);
            debug!(command = %spec.display(), code, "exited");
            ProcessOutcome {
                completion: Completion::Exited(code),
                stdout: out.join().unwrap_or_default(),
                stderr: err.join().unwrap_or_default(),
            }
        }
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            warn!(command = %spec.display(), "timed out");
            // Readers are left detached: a grandchild may still hold the pipes.
            ProcessOutcome {
                completion: Completion::TimedOut,
                stdout: String::new(),
                stderr: "timed out".to_string(),
            }
        }
        Err(e) => {
            let _ = child.kill();
            ProcessOutcome {
                completion: Completion::SpawnFailed(e.to_string()),
                stdout: String::new(),
                stderr: e.to_string(),
            }
        }
    }
}
