// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution and output capture for blackbox.
//!
//! This crate launches a target executable, feeds it input, and records
//! everything it printed together with its exit code. Every invocation is
//! bounded by a wall-clock timeout and the child is always reaped.

mod capture;
mod runner;

pub use capture::ProcessCapture;
pub use runner::{Invocation, ProcessRunner, RunError};
