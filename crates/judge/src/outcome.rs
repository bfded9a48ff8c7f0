// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative expectations for a single test.
//!
//! An [`OutcomeSpec`] states what a correct run of the target looks like:
//! the expected success flag, exit code, and one rule for stdout. The rule
//! is a sum type, so a failure expectation can never carry stdout and a
//! capture expectation always carries its pattern and fields.

use crate::comparator::TypedComparator;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeSet;
use thiserror::Error;

/// Which family of rules judges the capture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Plain stdout or digest comparison
    Exact,
    /// Process must fail with a given exit code
    Fail,
    /// Regex applied to stdout, captured groups checked by typed comparators
    RegexCaptures,
}

/// Terminate `text` with a newline unless it is empty or already ends with one.
pub fn terminate_line(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{}\n", text))
    }
}

fn terminated(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Expected stdout text; every candidate is newline-terminated on construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectedStdout {
    /// Exactly this text
    Single(String),
    /// Any one of these texts, order-independent
    AnyOf(Vec<String>),
}

impl ExpectedStdout {
    pub fn single(text: impl Into<String>) -> Self {
        Self::Single(terminated(text.into()))
    }

    pub fn any_of<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(
            candidates
                .into_iter()
                .map(|c| terminated(c.into()))
                .collect(),
        )
    }

    /// All acceptable texts
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::AnyOf(candidates) => candidates,
        }
    }

    /// Whether `actual` (newline-normalized) equals an acceptable text
    pub fn accepts(&self, actual: &str) -> bool {
        let actual = terminate_line(actual);
        self.candidates().iter().any(|c| *c == actual)
    }
}

/// The stdout rule of an expectation
#[derive(Clone, Debug, PartialEq)]
pub enum Expectation {
    /// Stdout equals the expected text (or one of several)
    Stdout(ExpectedStdout),
    /// SHA-256 hex digest of stdout equals this digest
    Digest(String),
    /// Pattern matches stdout and each capture group satisfies its comparator
    Captures {
        pattern: String,
        fields: Vec<TypedComparator>,
    },
    /// Process fails with this exit code, prints to stderr and nothing to stdout
    Failure { exit_code: i32 },
}

/// Errors found when checking an expectation before running it
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutcomeSpecError {
    #[error("invalid regex pattern '{pattern}': {error}")]
    InvalidRegex { pattern: String, error: String },

    #[error("pattern '{pattern}' has {groups} capture groups but {fields} fields are expected")]
    FieldCountMismatch {
        pattern: String,
        groups: usize,
        fields: usize,
    },

    #[error("'{0}' is not a SHA-256 hex digest")]
    InvalidDigest(String),

    #[error("at least one acceptable stdout is required")]
    NoCandidates,

    #[error("a failing run cannot expect exit code 0")]
    SuccessExitCode,
}

/// Declarative expectation for one test
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeSpec {
    expectation: Expectation,
    show_diff: bool,
    tags: BTreeSet<String>,
}

impl OutcomeSpec {
    pub fn new(expectation: Expectation) -> Self {
        Self {
            expectation,
            show_diff: false,
            tags: BTreeSet::new(),
        }
    }

    /// Successful run printing exactly `expected`
    pub fn stdout(expected: impl Into<String>) -> Self {
        Self::new(Expectation::Stdout(ExpectedStdout::single(expected)))
    }

    /// Successful run printing any one of `candidates`
    pub fn any_of<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Expectation::Stdout(ExpectedStdout::any_of(candidates)))
    }

    /// Successful run whose stdout hashes to `digest`
    pub fn sha256(digest: impl Into<String>) -> Self {
        Self::new(Expectation::Digest(digest.into()))
    }

    /// Successful run whose stdout matches `pattern` with typed capture groups
    pub fn captures(pattern: impl Into<String>, fields: Vec<TypedComparator>) -> Self {
        Self::new(Expectation::Captures {
            pattern: pattern.into(),
            fields,
        })
    }

    /// Failing run exiting with `exit_code`
    pub fn failure(exit_code: i32) -> Self {
        Self::new(Expectation::Failure { exit_code })
    }

    /// Include a unified diff when plain stdout comparison fails
    pub fn with_show_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn mode(&self) -> Mode {
        match self.expectation {
            Expectation::Stdout(_) | Expectation::Digest(_) => Mode::Exact,
            Expectation::Captures { .. } => Mode::RegexCaptures,
            Expectation::Failure { .. } => Mode::Fail,
        }
    }

    pub fn expect_success(&self) -> bool {
        !matches!(self.expectation, Expectation::Failure { .. })
    }

    pub fn is_hash_mode(&self) -> bool {
        matches!(self.expectation, Expectation::Digest(_))
    }

    /// Exit code a correct run ends with
    pub fn expected_exit_code(&self) -> i32 {
        match self.expectation {
            Expectation::Failure { exit_code } => exit_code,
            _ => 0,
        }
    }

    pub fn show_diff(&self) -> bool {
        self.show_diff
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Check the expectation can be evaluated as declared.
    pub fn validate(&self) -> Result<(), OutcomeSpecError> {
        match &self.expectation {
            Expectation::Stdout(expected) => {
                if expected.candidates().is_empty() {
                    return Err(OutcomeSpecError::NoCandidates);
                }
            }
            Expectation::Digest(digest) => {
                let well_formed =
                    digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit());
                if !well_formed {
                    return Err(OutcomeSpecError::InvalidDigest(digest.clone()));
                }
            }
            Expectation::Captures { pattern, fields } => {
                let re = Regex::new(pattern).map_err(|e| OutcomeSpecError::InvalidRegex {
                    pattern: pattern.clone(),
                    error: e.to_string(),
                })?;
                // captures_len counts the implicit whole-match group
                let groups = re.captures_len() - 1;
                if groups != fields.len() {
                    return Err(OutcomeSpecError::FieldCountMismatch {
                        pattern: pattern.clone(),
                        groups,
                        fields: fields.len(),
                    });
                }
            }
            Expectation::Failure { exit_code } => {
                if *exit_code == 0 {
                    return Err(OutcomeSpecError::SuccessExitCode);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
