// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log configuration

/// When appended records are forced to stable storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Sync after every append (the default)
    #[default]
    EveryAppend,
    /// Never sync implicitly; the caller batches with `Log::sync`
    Manual,
}

/// Configuration for a [`crate::Log`]
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub sync: SyncPolicy,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync(mut self, sync: SyncPolicy) -> Self {
        self.sync = sync;
        self
    }
}
