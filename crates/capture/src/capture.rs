// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured process output.

use std::time::Duration;

/// Complete stdout/stderr/exit-code record of one subprocess invocation.
///
/// A capture is immutable once produced; the runner is the only producer
/// outside of tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessCapture {
    stdout: String,
    raw_stdout: Vec<u8>,
    stdout_is_utf8: bool,
    stderr: String,
    exit_code: i32,
    timed_out: bool,
    elapsed: Duration,
}

impl ProcessCapture {
    /// Capture of a process that ran to completion; the text is kept as given
    pub fn exited(
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: i32,
        elapsed: Duration,
    ) -> Self {
        let stdout = stdout.into();
        Self {
            raw_stdout: stdout.as_bytes().to_vec(),
            stdout,
            stdout_is_utf8: true,
            stderr: stderr.into(),
            exit_code,
            timed_out: false,
            elapsed,
        }
    }

    /// Capture built from the bytes a process wrote.
    ///
    /// The text views have `\r\n` line endings turned into `\n`. Invalid
    /// UTF-8 is replaced in the text views and flagged by
    /// [`ProcessCapture::stdout_is_utf8`]; [`ProcessCapture::raw_stdout`]
    /// keeps the bytes untouched.
    pub fn from_output(
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        exit_code: i32,
        elapsed: Duration,
    ) -> Self {
        let (stdout_text, stdout_is_utf8) = match std::str::from_utf8(&stdout) {
            Ok(text) => (normalize_newlines(text), true),
            Err(_) => (normalize_newlines(&String::from_utf8_lossy(&stdout)), false),
        };
        Self {
            stdout: stdout_text,
            raw_stdout: stdout,
            stdout_is_utf8,
            stderr: normalize_newlines(&String::from_utf8_lossy(&stderr)),
            exit_code,
            timed_out: false,
            elapsed,
        }
    }

    /// Capture of a process that was killed after exceeding its timeout.
    ///
    /// No partial output is kept.
    pub fn timed_out(elapsed: Duration) -> Self {
        Self {
            stdout: String::new(),
            raw_stdout: Vec::new(),
            stdout_is_utf8: true,
            stderr: String::new(),
            exit_code: -1,
            timed_out: true,
            elapsed,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Bytes written to stdout, before decoding
    pub fn raw_stdout(&self) -> &[u8] {
        &self.raw_stdout
    }

    pub fn stdout_is_utf8(&self) -> bool {
        self.stdout_is_utf8
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Wall-clock time from launch to exit (or to the kill on timeout)
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the process exited with the canonical success code
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
