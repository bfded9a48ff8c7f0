// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite configuration types for TOML suite files.

use serde::Deserialize;
use std::path::PathBuf;

/// Per-test timeout when nothing else sets one
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Top-level suite configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Name for reporting
    #[serde(default)]
    pub name: String,

    /// Program under test, relative to the suite file
    #[serde(default)]
    pub executable: Option<String>,

    /// Default per-test timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Test categories in execution order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl SuiteConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// A named group of tests sharing input mode and capture pattern
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub name: String,

    /// Default regex for tests using `fields`
    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub input: InputMode,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub tests: Vec<TestConfig>,
}

/// How test arguments reach the program
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// As command-line arguments
    #[default]
    Args,
    /// Joined by spaces, newline-terminated, on stdin
    Stdin,
}

/// One test; exactly one of `stdout`, `sha256`, `fields`, `fail` is set
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Display name (default: 1-based position in the category)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Raw stdin, used as-is regardless of the category input mode
    #[serde(default)]
    pub stdin: Option<String>,

    #[serde(default)]
    pub stdout: Option<StdoutConfig>,

    /// Lowercase hex SHA-256 of the expected stdout
    #[serde(default)]
    pub sha256: Option<String>,

    /// Typed assertions on the pattern's capture groups
    #[serde(default)]
    pub fields: Option<Vec<FieldConfig>>,

    /// Overrides the category pattern
    #[serde(default)]
    pub pattern: Option<String>,

    /// Expected non-zero exit code of a failing run
    #[serde(default)]
    pub fail: Option<i32>,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub show_diff: bool,
}

/// Expected stdout: one text or a list of acceptable texts
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StdoutConfig {
    One(String),
    AnyOf(Vec<String>),
}

/// Expected value of one capture group
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldConfig {
    Int(i64),
    Float(f64),
    Text(String),
    IntRange([i64; 2]),
    FloatRange([f64; 2]),
}

/// Settings that take precedence over the suite file.
///
/// Command-line flags win over environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub timeout_ms: Option<u64>,
    pub executable: Option<PathBuf>,
    /// Force unified diffs on every plain stdout test
    pub show_diff: bool,
}

impl Overrides {
    /// Layer command-line values over the environment
    pub fn layered(timeout_ms: Option<u64>, executable: Option<PathBuf>, show_diff: bool) -> Self {
        Self {
            timeout_ms: timeout_ms.or_else(crate::env::timeout_ms),
            executable: executable.or_else(crate::env::executable),
            show_diff,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
