// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory holding one log file
pub struct Scratch {
    pub dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("kv.jsonl")
    }

    /// `rlog` pointed at this scratch log through `RLOG_FILE`
    pub fn rlog(&self) -> Command {
        let mut cmd = Command::cargo_bin("rlog").expect("rlog binary should be built");
        cmd.env("RLOG_FILE", self.log_path()).env_remove("RUST_LOG");
        cmd
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    pub fn write_log(&self, contents: &str) {
        std::fs::write(self.log_path(), contents).expect("Failed to write log");
    }
}
