// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box test harness
//!
//! Runs an external program against a TOML suite of tests, judges every run
//! against its declared expectation and reports per-category results.
//!
#![doc = include_str!("../docs/USAGE.md")]

/// Documentation modules for docs.rs
pub mod docs {
    /// Suite file reference: categories, tests, expectations and field kinds.
    #[doc = include_str!("../docs/SUITES.md")]
    pub mod suites {}
}

// Internal modules - pub for binary access, hidden from docs
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod env;
#[doc(hidden)]
pub mod executor;
#[doc(hidden)]
pub mod output_diagnostic;
#[doc(hidden)]
pub mod report;
#[doc(hidden)]
pub mod suite;

/// Re-exported judging types from blackbox-judge.
pub mod judge {
    pub use blackbox_judge::{
        compare, OutcomeSpec, ResultAggregator, RunResults, RunSummary, TypedComparator, Verdict,
    };
}
