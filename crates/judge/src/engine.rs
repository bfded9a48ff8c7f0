// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison engine: judges a capture against an expectation.
//!
//! Rules are evaluated in a fixed priority order and the first violated one
//! is reported:
//!
//! 1. timeout
//! 2. success flag (expected failure but exit 0, or the reverse)
//! 3. failure expectations: stderr present, stdout empty, exit code
//! 4. digest comparison over the raw stdout bytes
//! 5. capture expectations: stderr empty, pattern match, typed fields
//! 6. plain stdout comparison
//!
//! Capture and plain comparisons need stdout to be valid UTF-8.

use crate::comparator::TypedComparator;
use crate::escape::{escape, escape_multi_or};
use crate::outcome::{terminate_line, Expectation, ExpectedStdout, OutcomeSpec};
use crate::verdict::{Diagnostics, Failure, FailureKind, Verdict};
use blackbox_capture::ProcessCapture;
use regex::Regex;
use sha2::{Digest, Sha256};
use similar::TextDiff;

/// Judge `capture` against `spec`.
///
/// Never panics and never returns an error: malformed patterns and
/// unconvertible values become [`FailureKind::Internal`] verdicts.
pub fn compare(spec: &OutcomeSpec, capture: &ProcessCapture) -> Verdict {
    match judge(spec, capture) {
        Ok(()) => Verdict::pass(capture.elapsed()),
        Err(failure) => Verdict::fail(failure, capture.elapsed()).with_stderr(capture.stderr()),
    }
}

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

fn judge(spec: &OutcomeSpec, capture: &ProcessCapture) -> Result<(), Failure> {
    if capture.is_timed_out() {
        return Err(Failure::new(
            FailureKind::Timeout,
            format!("timeout after {} ms", capture.elapsed().as_millis()),
        ));
    }

    let exited_ok = capture.exit_code() == 0;
    if !spec.expect_success() && exited_ok {
        return Err(Failure::new(
            FailureKind::WrongSuccessFlag,
            "program should not return successful exit code",
        ));
    }
    if spec.expect_success() && !exited_ok {
        return Err(Failure::new(
            FailureKind::WrongExitCode,
            format!(
                "program should not fail (exit code = {})",
                capture.exit_code()
            ),
        )
        .with_diagnostics(Diagnostics::ExitCode {
            expected: 0,
            actual: capture.exit_code(),
        }));
    }

    match spec.expectation() {
        Expectation::Failure { exit_code } => judge_failure(*exit_code, capture),
        Expectation::Digest(expected) => judge_digest(expected, capture.raw_stdout()),
        Expectation::Captures { pattern, fields } => judge_captures(pattern, fields, capture),
        Expectation::Stdout(expected) => {
            require_utf8(capture)?;
            judge_stdout(expected, capture.stdout(), spec.show_diff())
        }
    }
}

fn require_utf8(capture: &ProcessCapture) -> Result<(), Failure> {
    if capture.stdout_is_utf8() {
        return Ok(());
    }
    Err(Failure::new(
        FailureKind::Internal,
        "standard output is not valid UTF-8",
    ))
}

fn judge_failure(expected_code: i32, capture: &ProcessCapture) -> Result<(), Failure> {
    if capture.stderr().is_empty() {
        return Err(Failure::new(
            FailureKind::EmptyStderrOnFailure,
            "standard error output is empty",
        ));
    }
    if !capture.stdout().is_empty() {
        return Err(Failure::new(
            FailureKind::NonEmptyStdoutOnFailure,
            "on error program should not write anything to standard output",
        ));
    }
    if capture.exit_code() != expected_code {
        return Err(Failure::new(
            FailureKind::WrongExitCode,
            format!(
                "program returns {}, but should return {}",
                capture.exit_code(),
                expected_code
            ),
        )
        .with_diagnostics(Diagnostics::ExitCode {
            expected: expected_code,
            actual: capture.exit_code(),
        }));
    }
    Ok(())
}

fn judge_digest(expected: &str, stdout: &[u8]) -> Result<(), Failure> {
    let actual = sha256_hex(stdout);
    if actual == expected {
        return Ok(());
    }
    Err(Failure::new(
        FailureKind::OutputMismatch,
        format!(
            "SHA-256 of actual output ({}) does not equal expected ({})",
            actual, expected
        ),
    )
    .with_diagnostics(Diagnostics::Digests {
        expected: expected.to_string(),
        actual,
    }))
}

fn judge_captures(
    pattern: &str,
    fields: &[TypedComparator],
    capture: &ProcessCapture,
) -> Result<(), Failure> {
    if !capture.stderr().is_empty() {
        return Err(Failure::new(
            FailureKind::NonEmptyStderrOnSuccess,
            "on success program should not write anything to standard error output",
        ));
    }

    require_utf8(capture)?;

    let re = Regex::new(pattern).map_err(|e| {
        Failure::new(
            FailureKind::Internal,
            format!("invalid regex pattern '{}': {}", pattern, e),
        )
    })?;
    let Some(groups) = re.captures(capture.stdout()) else {
        return Err(Failure::new(
            FailureKind::PatternNotMatched,
            "output format is incorrect",
        ));
    };

    for (index, field) in fields.iter().enumerate() {
        let Some(raw) = groups.get(index + 1).map(|m| m.as_str()) else {
            return Err(Failure::new(
                FailureKind::Internal,
                format!("capture group {} did not participate in the match", index + 1),
            ));
        };
        let matched = field.matches(raw).map_err(|e| {
            Failure::new(
                FailureKind::Internal,
                format!("extracted positional value [{}]: {}", index, e),
            )
        })?;
        if !matched {
            let expected = field.to_string();
            return Err(Failure::new(
                FailureKind::FieldMismatch(index),
                format!(
                    "assert at extracted positional value [{}] => [actual = {}] vs [expected = {}]",
                    index,
                    escape(raw),
                    expected
                ),
            )
            .with_diagnostics(Diagnostics::Field {
                index,
                expected,
                actual: raw.to_string(),
            }));
        }
    }
    Ok(())
}

fn judge_stdout(expected: &ExpectedStdout, stdout: &str, show_diff: bool) -> Result<(), Failure> {
    if expected.accepts(stdout) {
        return Ok(());
    }
    let actual = terminate_line(stdout).into_owned();

    match expected {
        ExpectedStdout::AnyOf(candidates) => Err(Failure::new(
            FailureKind::OutputMismatch,
            format!(
                "expected [{}] but actual is [{}]",
                escape_multi_or(candidates),
                escape(&actual)
            ),
        )
        .with_diagnostics(Diagnostics::Candidates {
            candidates: candidates.clone(),
            actual,
        })),
        ExpectedStdout::Single(text) => {
            let diff = show_diff.then(|| unified_diff(text, &actual));
            Err(Failure::new(
                FailureKind::OutputMismatch,
                "standard output does not match expected",
            )
            .with_diagnostics(Diagnostics::Blocks {
                expected: text.clone(),
                actual,
                diff,
            }))
        }
    }
}

fn unified_diff(expected: &str, actual: &str) -> String {
    TextDiff::from_lines(expected, actual)
        .unified_diff()
        .header("expected_stdout", "actual_stdout")
        .to_string()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
