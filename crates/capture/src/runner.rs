// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-time process execution.

use crate::capture::ProcessCapture;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};

/// One launch of the target executable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to launch; resolved to an absolute path before spawning
    pub executable: PathBuf,

    /// Arguments, in order
    pub args: Vec<String>,

    /// Data written to the child's stdin before it is closed
    pub stdin: Option<String>,

    /// Wall-clock limit measured from launch
    pub timeout: Duration,
}

impl Invocation {
    /// Create an invocation with no arguments and no stdin
    pub fn new(executable: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            stdin: None,
            timeout,
        }
    }

    /// Set arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set stdin contents
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors that prevent a capture from being produced at all
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to launch {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while running {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Runs target executables and captures their output.
///
/// Each call owns its child from spawn to reap. On unix the child runs in its
/// own process group, and the whole group is killed when the timeout expires
/// or waiting fails. The child alone is killed (through `kill_on_drop`) when
/// the future running it is dropped.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create a runner that inherits the current working directory
    pub fn new() -> Self {
        Self { working_dir: None }
    }

    /// Launch every child from the given directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Run an invocation to completion or timeout.
    ///
    /// A timeout is not an error: it yields a capture with
    /// [`ProcessCapture::is_timed_out`] set and no output.
    pub async fn run(&self, invocation: &Invocation) -> Result<ProcessCapture, RunError> {
        let executable =
            std::path::absolute(&invocation.executable).map_err(|source| RunError::Launch {
                path: invocation.executable.clone(),
                source,
            })?;

        let mut command = Command::new(&executable);
        command
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }
        // The child leads its own group so a timeout can kill its descendants too.
        #[cfg(unix)]
        command.process_group(0);

        let started = Instant::now();
        let mut child = command.spawn().map_err(|source| RunError::Launch {
            path: executable.clone(),
            source,
        })?;

        let stdin_pipe = child.stdin.take();
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let input = invocation.stdin.as_deref().unwrap_or_default().as_bytes();

        // Feeding, draining and waiting all happen under the same deadline.
        let collected = tokio::time::timeout(invocation.timeout, async {
            let (status, stdout, stderr, ()) = tokio::join!(
                child.wait(),
                drain(stdout_pipe),
                drain(stderr_pipe),
                feed(stdin_pipe, input),
            );
            Ok::<_, io::Error>((status?, stdout?, stderr?))
        })
        .await;

        match collected {
            Ok(Ok((status, stdout, stderr))) => Ok(ProcessCapture::from_output(
                stdout,
                stderr,
                exit_code(status),
                started.elapsed(),
            )),
            Ok(Err(source)) => {
                reap(&mut child).await;
                Err(RunError::Io {
                    path: executable,
                    source,
                })
            }
            Err(_) => {
                let elapsed = started.elapsed();
                reap(&mut child).await;
                Ok(ProcessCapture::timed_out(elapsed))
            }
        }
    }

    /// Run an invocation on a private current-thread runtime.
    ///
    /// Must not be called from inside another tokio runtime.
    pub fn run_blocking(&self, invocation: &Invocation) -> Result<ProcessCapture, RunError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RunError::Runtime)?;
        runtime.block_on(self.run(invocation))
    }
}

/// Write input and close the pipe so the child observes end-of-input.
async fn feed(pipe: Option<ChildStdin>, input: &[u8]) {
    if let Some(mut pipe) = pipe {
        // A child may exit without reading its input; the broken pipe is not a failure.
        let _ = pipe.write_all(input).await;
        drop(pipe);
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Kill and wait so no zombie or orphan outlives the run.
async fn reap(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
            // The group may already be gone.
            let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
        }
    }
    // Fails only when the child is already gone.
    let _ = child.kill().await;
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
