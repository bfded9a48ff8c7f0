// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn timeout_ms_returns_none_when_unset() {
    std::env::remove_var(BLACKBOX_TIMEOUT_MS);
    assert_eq!(timeout_ms(), None);
}

#[test]
#[serial]
fn timeout_ms_parses_value() {
    std::env::set_var(BLACKBOX_TIMEOUT_MS, " 2500 ");
    let result = timeout_ms();
    std::env::remove_var(BLACKBOX_TIMEOUT_MS);
    assert_eq!(result, Some(2500));
}

#[test]
#[serial]
fn timeout_ms_ignores_garbage() {
    std::env::set_var(BLACKBOX_TIMEOUT_MS, "soon");
    let result = timeout_ms();
    std::env::remove_var(BLACKBOX_TIMEOUT_MS);
    assert_eq!(result, None);
}

#[test]
#[serial]
fn executable_returns_path_when_set() {
    std::env::set_var(BLACKBOX_EXECUTABLE, "/usr/local/bin/calc");
    let result = executable();
    std::env::remove_var(BLACKBOX_EXECUTABLE);
    assert_eq!(result, Some(PathBuf::from("/usr/local/bin/calc")));
}

#[test]
#[serial]
fn executable_ignores_empty_value() {
    std::env::set_var(BLACKBOX_EXECUTABLE, "");
    let result = executable();
    std::env::remove_var(BLACKBOX_EXECUTABLE);
    assert_eq!(result, None);
}
