// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Validated suite model built from a [`SuiteConfig`].
//!
//! Every test carries a ready-to-judge [`OutcomeSpec`] and a resolved
//! timeout, so the executor never has to look back at the config.

use crate::config::{
    CategoryConfig, FieldConfig, InputMode, Overrides, StdoutConfig, SuiteConfig, TestConfig,
    DEFAULT_TIMEOUT_MS,
};
use blackbox_capture::Invocation;
use blackbox_judge::{OutcomeSpec, OutcomeSpecError, TypedComparator};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a suite file
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("failed to read suite {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid suite {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no executable given (set `executable` in the suite, BLACKBOX_EXECUTABLE or --executable)")]
    MissingExecutable,

    #[error("category '{category}', test '{test}': {reason}")]
    Test {
        category: String,
        test: String,
        reason: String,
    },

    #[error("category '{category}', test '{test}': {source}")]
    Outcome {
        category: String,
        test: String,
        #[source]
        source: OutcomeSpecError,
    },
}

/// One runnable test
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub timeout: Duration,
    pub spec: OutcomeSpec,
}

impl TestCase {
    pub fn tags(&self) -> &BTreeSet<String> {
        self.spec.tags()
    }

    pub fn invocation(&self, executable: &Path) -> Invocation {
        let invocation = Invocation::new(executable, self.timeout).with_args(self.args.clone());
        match &self.stdin {
            Some(input) => invocation.with_stdin(input.clone()),
            None => invocation,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub name: String,
    pub tests: Vec<TestCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Suite {
    pub name: String,
    pub executable: PathBuf,
    pub categories: Vec<Category>,
}

impl Suite {
    /// Read, parse and validate a suite file
    pub fn load(path: &Path, overrides: &Overrides) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = SuiteConfig::from_toml(&content).map_err(|source| SuiteError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_config(config, base_dir, overrides)
    }

    /// Build a suite, resolving the executable against `base_dir`
    pub fn from_config(
        config: SuiteConfig,
        base_dir: &Path,
        overrides: &Overrides,
    ) -> Result<Self, SuiteError> {
        let executable = match (&overrides.executable, &config.executable) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => base_dir.join(path),
            (None, None) => return Err(SuiteError::MissingExecutable),
        };
        let suite_timeout = config.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

        let categories = config
            .categories
            .into_iter()
            .map(|category| build_category(category, suite_timeout, overrides))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: config.name,
            executable,
            categories,
        })
    }

    /// Keep only tests whose tags are all in `tags`; empty categories are dropped
    pub fn extract_only(&self, tags: &BTreeSet<String>) -> Suite {
        let categories = self
            .categories
            .iter()
            .filter_map(|category| {
                let tests: Vec<TestCase> = category
                    .tests
                    .iter()
                    .filter(|t| t.tags().is_subset(tags))
                    .cloned()
                    .collect();
                (!tests.is_empty()).then(|| Category {
                    name: category.name.clone(),
                    tests,
                })
            })
            .collect();
        Suite {
            name: self.name.clone(),
            executable: self.executable.clone(),
            categories,
        }
    }

    pub fn test_count(&self) -> usize {
        self.categories.iter().map(|c| c.tests.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.test_count() == 0
    }
}

fn build_category(
    config: CategoryConfig,
    suite_timeout: u64,
    overrides: &Overrides,
) -> Result<Category, SuiteError> {
    let category_timeout = config.timeout_ms.unwrap_or(suite_timeout);
    let tests = config
        .tests
        .into_iter()
        .enumerate()
        .map(|(index, test)| {
            let name = test
                .name
                .clone()
                .unwrap_or_else(|| (index + 1).to_string());
            build_test(
                &config.name,
                name,
                test,
                config.pattern.as_deref(),
                config.input,
                category_timeout,
                overrides,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Category {
        name: config.name,
        tests,
    })
}

fn build_test(
    category: &str,
    name: String,
    config: TestConfig,
    category_pattern: Option<&str>,
    input: InputMode,
    category_timeout: u64,
    overrides: &Overrides,
) -> Result<TestCase, SuiteError> {
    let invalid = |reason: &str| SuiteError::Test {
        category: category.to_string(),
        test: name.clone(),
        reason: reason.to_string(),
    };

    let declared = [
        config.stdout.is_some(),
        config.sha256.is_some(),
        config.fields.is_some(),
        config.fail.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();
    if declared != 1 {
        return Err(invalid(
            "exactly one of `stdout`, `sha256`, `fields`, `fail` must be set",
        ));
    }
    if config.pattern.is_some() && config.fields.is_none() {
        return Err(invalid("`pattern` is only used together with `fields`"));
    }

    let spec = match (config.stdout, config.sha256, config.fields, config.fail) {
        (Some(StdoutConfig::One(text)), _, _, _) => OutcomeSpec::stdout(text),
        (Some(StdoutConfig::AnyOf(candidates)), _, _, _) => OutcomeSpec::any_of(candidates),
        (_, Some(digest), _, _) => OutcomeSpec::sha256(digest),
        (_, _, Some(fields), _) => {
            let pattern = config
                .pattern
                .as_deref()
                .or(category_pattern)
                .ok_or_else(|| invalid("`fields` requires a `pattern` on the test or category"))?;
            OutcomeSpec::captures(pattern, fields.into_iter().map(comparator).collect())
        }
        (_, _, _, Some(exit_code)) => OutcomeSpec::failure(exit_code),
        (None, None, None, None) => return Err(invalid("no expectation")),
    }
    .with_show_diff(config.show_diff || overrides.show_diff)
    .with_tags(config.tags);

    spec.validate().map_err(|source| SuiteError::Outcome {
        category: category.to_string(),
        test: name.clone(),
        source,
    })?;

    let (args, stdin) = match (input, config.stdin) {
        (_, Some(stdin)) => (config.args, Some(stdin)),
        (InputMode::Args, None) => (config.args, None),
        (InputMode::Stdin, None) => (Vec::new(), Some(format!("{}\n", config.args.join(" ")))),
    };

    let timeout_ms = overrides
        .timeout_ms
        .or(config.timeout_ms)
        .unwrap_or(category_timeout);

    Ok(TestCase {
        name,
        args,
        stdin,
        timeout: Duration::from_millis(timeout_ms),
        spec,
    })
}

fn comparator(field: FieldConfig) -> TypedComparator {
    match field {
        FieldConfig::Int(value) => TypedComparator::int(value),
        FieldConfig::Float(value) => TypedComparator::float(value),
        FieldConfig::Text(value) => TypedComparator::text(value),
        FieldConfig::IntRange([a, b]) => TypedComparator::int_range(a, b),
        FieldConfig::FloatRange([a, b]) => TypedComparator::float_range(a, b),
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
