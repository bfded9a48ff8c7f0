// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation and comparison engine for blackbox.
//!
//! This crate turns a finished [`ProcessCapture`] and a declared
//! [`OutcomeSpec`] into a [`Verdict`], and collects verdicts into
//! per-category summaries.

mod aggregate;
mod comparator;
mod engine;
mod escape;
mod outcome;
mod verdict;

pub use aggregate::{
    CategoryRun, CategorySummary, RecordError, ResultAggregator, RunResults, RunSummary,
    TestRecord,
};
pub use blackbox_capture::ProcessCapture;
pub use comparator::{ConversionError, NumericRange, Scalar, TypedComparator, ValueKind};
pub use engine::{compare, sha256_hex};
pub use escape::{escape, escape_multi, escape_multi_or};
pub use outcome::{terminate_line, Expectation, ExpectedStdout, Mode, OutcomeSpec, OutcomeSpecError};
pub use verdict::{Diagnostics, Failure, FailureKind, Verdict};
