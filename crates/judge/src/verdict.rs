// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verdict types produced by the comparison engine.

use crate::escape::{escape, escape_multi_or};
use blackbox_capture::RunError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a test failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Expected a failing exit code but the process succeeded
    WrongSuccessFlag,
    /// Failing run wrote nothing to stderr
    EmptyStderrOnFailure,
    /// Failing run wrote to stdout
    NonEmptyStdoutOnFailure,
    /// Successful run of a capture expectation wrote to stderr
    NonEmptyStderrOnSuccess,
    /// Exit code differs from the expected one
    WrongExitCode,
    /// Stdout (or its digest) differs from every acceptable value
    OutputMismatch,
    /// Capture pattern did not match stdout
    PatternNotMatched,
    /// Captured group at this index failed its comparator
    FieldMismatch(usize),
    /// Process exceeded its timeout and was killed
    Timeout,
    /// Executable could not be launched
    LaunchError,
    /// The comparison itself could not be carried out
    Internal,
}

/// Structured detail attached to a failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostics {
    ExitCode {
        expected: i32,
        actual: i32,
    },
    Digests {
        expected: String,
        actual: String,
    },
    Candidates {
        candidates: Vec<String>,
        actual: String,
    },
    Blocks {
        expected: String,
        actual: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    Field {
        index: usize,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostics::ExitCode { expected, actual } => {
                write!(f, "exit code: expected {}, actual {}", expected, actual)
            }
            Diagnostics::Digests { expected, actual } => {
                write!(f, "sha256: expected {}, actual {}", expected, actual)
            }
            Diagnostics::Candidates { candidates, actual } => write!(
                f,
                "expected: {}\nactual: {}",
                escape_multi_or(candidates),
                escape(actual)
            ),
            Diagnostics::Blocks {
                expected,
                actual,
                diff,
            } => {
                write!(
                    f,
                    "Expected:\n\"\"\"\n{}\"\"\"\nbut actual is:\n\"\"\"\n{}\"\"\"",
                    expected, actual
                )?;
                if let Some(diff) = diff {
                    write!(f, "\nDifference:\n{}", diff)?;
                }
                Ok(())
            }
            Diagnostics::Field {
                index,
                expected,
                actual,
            } => write!(
                f,
                "field [{}]: expected {}, actual {}",
                index,
                expected,
                escape(actual)
            ),
        }
    }
}

/// A failed judgment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// Pass/fail judgment of one test run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    #[serde(flatten)]
    failure: Option<Failure>,
    elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<String>,
}

impl Verdict {
    pub fn pass(elapsed: Duration) -> Self {
        Self {
            failure: None,
            elapsed_ms: millis(elapsed),
            stderr: None,
        }
    }

    pub fn fail(failure: Failure, elapsed: Duration) -> Self {
        Self {
            failure: Some(failure),
            elapsed_ms: millis(elapsed),
            stderr: None,
        }
    }

    /// Verdict for a run that never produced a capture
    pub fn from_run_error(error: &RunError, elapsed: Duration) -> Self {
        let kind = match error {
            RunError::Launch { .. } => FailureKind::LaunchError,
            RunError::Io { .. } | RunError::Runtime(_) => FailureKind::Internal,
        };
        Self::fail(Failure::new(kind, error.to_string()), elapsed)
    }

    /// Keep captured stderr for operators; empty stderr is not stored.
    pub fn with_stderr(mut self, stderr: &str) -> Self {
        if !stderr.is_empty() {
            self.stderr = Some(stderr.to_string());
        }
        self
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    pub fn message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.failure.as_ref().and_then(|f| f.diagnostics.as_ref())
    }

    /// One-line human description
    pub fn describe(&self) -> String {
        match &self.failure {
            None => format!("passed in {} ms", self.elapsed_ms),
            Some(failure) => failure.message.clone(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
