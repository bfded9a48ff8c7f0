// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for suite integration tests.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Program under test for most suites.
///
/// With no arguments it reads one line from stdin; otherwise the first
/// argument selects a command.
pub const CALC_SCRIPT: &str = r#"#!/bin/sh
if [ $# -eq 0 ]; then
    read -r line
    echo "got: $line"
    exit 0
fi
case "$1" in
    sum) echo "sum=$(($2 + $3))" ;;
    echo) shift; echo "$@" ;;
    fail) echo "bad input" >&2; exit 2 ;;
    noisy) echo "sum=1"; echo "warning" >&2 ;;
    sleep) sleep 5 ;;
    *) echo "unknown command $1" >&2; exit 1 ;;
esac
"#;

/// A scratch directory holding a suite file and its target script
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        ws.write_script("calc", CALC_SCRIPT);
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable script next to the suite
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Write a suite file and return its path
    pub fn write_suite(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("suite.toml");
        std::fs::write(&path, content).unwrap();
        path
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
