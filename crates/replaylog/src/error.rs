// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors returned by the replay log

use crate::registry::Tag;
use std::io;
use thiserror::Error;

/// Boxed error produced by an operation's own `apply`
pub type ApplyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in replay log operations
///
/// Nothing here is recovered from automatically. Replay failures leave the
/// caller's state mutated up to the last successfully applied record.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("no operation variants registered")]
    NoVariants,

    #[error("too many operation variants registered: {0}")]
    TooManyVariants(usize),

    #[error("operation variant `{name}` registered more than once")]
    DuplicateVariant { name: &'static str },

    #[error("unregistered operation variant `{kind}`")]
    UnregisteredVariant { kind: &'static str },

    #[error("could not encode operation `{kind}`: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write record: {0}")]
    Write(#[source] io::Error),

    #[error("failed to sync log: {0}")]
    Sync(#[source] io::Error),

    #[error("failed to read log at offset {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("corrupt log entry {index} at offset {offset}: {source}")]
    CorruptEntry {
        index: u64,
        offset: u64,
        #[source]
        source: serde_json::Error,
    },

    /// The stored tag names no registered variant.
    ///
    /// Negative tags and tags too large for a [`Tag`] land here as well. Only
    /// a tag that is not an integer at all, or lies outside the `i64` range,
    /// is reported as [`LogError::CorruptEntry`].
    #[error("log entry {index} has tag {tag}, but only {known} variants are registered")]
    OutOfRangeTag { index: u64, tag: i64, known: usize },

    #[error("could not decode log entry {index} (tag {tag}) into `{kind}`: {reason}")]
    Decode {
        index: u64,
        tag: Tag,
        kind: &'static str,
        reason: String,
    },

    #[error("could not apply log entry {index} (tag {tag}, `{kind}`): {source}")]
    Apply {
        index: u64,
        tag: Tag,
        kind: &'static str,
        #[source]
        source: ApplyError,
    },

    #[error("failed to rewind log: {0}")]
    Seek(#[source] io::Error),

    #[error("failed to close log: {0}")]
    Close(#[source] io::Error),

    #[error("log is closed")]
    Closed,
}
