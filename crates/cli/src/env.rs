// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by blackbox are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

pub use names::*;

use std::path::PathBuf;

/// `BLACKBOX_TIMEOUT_MS`: per-test timeout, overriding the suite file.
pub fn timeout_ms() -> Option<u64> {
    var_u64(names::BLACKBOX_TIMEOUT_MS)
}

/// `BLACKBOX_EXECUTABLE`: program under test, overriding the suite file.
pub fn executable() -> Option<PathBuf> {
    std::env::var(names::BLACKBOX_EXECUTABLE)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
