// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed key-value store rebuilt from its replay log

use crate::kv::{variants, KvOp, KvState};
use anyhow::{Context, Result};
use replaylog::{Log, LogConfig, SyncPolicy};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the log file
    pub path: PathBuf,
    /// Durability of each write
    pub sync: SyncPolicy,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: SyncPolicy::EveryAppend,
        }
    }
}

/// Key-value store whose state is the replay of its log
pub struct KvStore {
    config: StoreConfig,
    log: Log<KvOp, File>,
    state: KvState,
    records: u64,
}

impl KvStore {
    /// Open (or create) the log and replay it into memory
    pub fn open(config: StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&config.path)
            .with_context(|| format!("failed to open {}", config.path.display()))?;

        let log = Log::with_config(file, variants(), LogConfig::new().with_sync(config.sync))?;

        let mut state = KvState::new();
        let records = log
            .replay(&mut state)
            .with_context(|| format!("failed to replay {}", config.path.display()))?;
        tracing::debug!(records, keys = state.len(), "store loaded");

        Ok(Self {
            config,
            log,
            state,
            records,
        })
    }

    /// Record `op` and apply it to the in-memory state.
    ///
    /// The record is applied by replaying from the cursor left by the last
    /// replay, so memory only ever reflects what made it into the log.
    pub fn apply(&mut self, op: KvOp) -> Result<()> {
        self.log.append(&op)?;
        self.records += self.log.replay(&mut self.state)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(KvOp::set(key, value))
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.apply(KvOp::delete(key))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.state.get(key).map(String::as_str)
    }

    pub fn state(&self) -> &KvState {
        &self.state
    }

    /// Number of records replayed or appended so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush deferred syncs and close the log
    pub fn close(self) -> Result<()> {
        if self.config.sync == SyncPolicy::Manual {
            self.log.sync()?;
        }
        self.log
            .close()
            .with_context(|| format!("failed to close {}", self.config.path.display()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
