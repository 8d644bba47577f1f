// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! replaylog: type-safe append-only operation log
//!
//! A replay log records the sequence of operations that mutate an empty state
//! into its final state. Replaying the log against a fresh state rebuilds
//! that final state, e.g. restoring an in-memory map after a restart.
//!
//! This crate provides:
//! - `Operation` - the contract implemented by a caller's operation enum
//! - `Registry` / `Variant` - stable variant <-> tag mapping
//! - `Record` / `FrameReader` - self-delimiting JSON framing
//! - `Log` - append, replay, rewind and close over any `Storage`
//!
//! A log is safe to share between threads of one process. It is NOT safe for
//! concurrent use by multiple processes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod codec;
pub mod config;
pub mod error;
pub mod log;
pub mod operation;
pub mod registry;
pub mod storage;

pub use codec::{Frame, FrameReader, Record, StoredRecord};
pub use config::{LogConfig, SyncPolicy};
pub use error::{ApplyError, LogError};
pub use log::{Log, Position};
pub use operation::Operation;
pub use registry::{Registry, Tag, Variant};
pub use storage::Storage;

#[cfg(test)]
mod test_support;
