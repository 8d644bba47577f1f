// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The replay log facade: append, replay, rewind, close

use crate::codec::{encode_record, FrameReader, Record, StoredRecord};
use crate::config::{LogConfig, SyncPolicy};
use crate::error::LogError;
use crate::operation::Operation;
use crate::registry::{Registry, Variant};
use crate::storage::Storage;
use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Read cursor: where the next replay starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Byte offset of the next unread record
    pub offset: u64,
    /// Absolute index of the next unread record
    pub index: u64,
}

struct Inner<S> {
    // None once closed
    storage: Option<S>,
    cursor: Position,
}

/// Append-only log of operations on `O::State`.
///
/// All methods take the same internal lock, so appends, replays, rewinds and
/// closes on one `Log` are serialized against each other. Nothing coordinates
/// separate processes sharing the same storage.
///
/// Appends always go to the end of storage, while replay reads from its own
/// cursor. Replaying to the end and then appending needs no rewind, and a
/// later replay picks up only the newly appended records.
pub struct Log<O, S> {
    registry: Registry<O>,
    config: LogConfig,
    inner: Mutex<Inner<S>>,
}

impl<O: Operation, S: Storage> Log<O, S> {
    /// Create a log over `storage` with the ordered set of supported variants.
    ///
    /// The variant order must be identical between instantiations. Variants
    /// may only ever be added at the end.
    pub fn new(
        storage: S,
        variants: impl IntoIterator<Item = Variant<O>>,
    ) -> Result<Self, LogError> {
        Self::with_config(storage, variants, LogConfig::default())
    }

    pub fn with_config(
        storage: S,
        variants: impl IntoIterator<Item = Variant<O>>,
        config: LogConfig,
    ) -> Result<Self, LogError> {
        let registry = Registry::new(variants)?;
        tracing::debug!(variants = registry.len(), sync = ?config.sync, "log opened");
        Ok(Self {
            registry,
            config,
            inner: Mutex::new(Inner {
                storage: Some(storage),
                cursor: Position::default(),
            }),
        })
    }

    pub fn registry(&self) -> &Registry<O> {
        &self.registry
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Current read cursor
    pub fn position(&self) -> Result<Position, LogError> {
        let inner = self.lock();
        if inner.storage.is_none() {
            return Err(LogError::Closed);
        }
        Ok(inner.cursor)
    }

    /// Append an operation to the log.
    ///
    /// With [`SyncPolicy::EveryAppend`] the record is synced before this
    /// returns. On error the tail of the log is indeterminate: a record may
    /// have been partially written, and it is not repaired.
    pub fn append(&self, op: &O) -> Result<(), LogError> {
        let span = tracing::info_span!(
            "log.append",
            kind = op.kind(),
            tag = tracing::field::Empty
        );
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.append_locked(op);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(bytes) => tracing::debug!(bytes, elapsed_ms, "appended"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "append failed"),
        }

        result.map(|_| ())
    }

    fn append_locked(&self, op: &O) -> Result<usize, LogError> {
        let mut inner = self.lock();
        let storage = inner.storage.as_mut().ok_or(LogError::Closed)?;

        let kind = op.kind();
        let tag = self.registry.tag_of(op)?;
        tracing::Span::current().record("tag", tag.0);
        let payload = op
            .encode()
            .map_err(|source| LogError::Encode { kind, source })?;
        let bytes = encode_record(&Record { tag, payload })
            .map_err(|source| LogError::Encode { kind, source })?;

        storage.seek(SeekFrom::End(0)).map_err(LogError::Write)?;
        storage.write_all(&bytes).map_err(LogError::Write)?;
        storage.flush().map_err(LogError::Write)?;

        if self.config.sync == SyncPolicy::EveryAppend {
            storage.sync().map_err(LogError::Sync)?;
        }

        Ok(bytes.len())
    }

    /// Replay records from the current cursor into `state`.
    ///
    /// Returns how many records were applied. Stops at the first bad record
    /// without skipping it. `state` keeps every mutation applied before the
    /// failure and the cursor stays on the failing record.
    pub fn replay(&self, state: &mut O::State) -> Result<u64, LogError> {
        let mut guard = self.lock();
        let Inner { storage, cursor } = &mut *guard;
        let storage = storage.as_mut().ok_or(LogError::Closed)?;

        let span = tracing::info_span!("log.replay", offset = cursor.offset, index = cursor.index);
        let _enter = span.enter();

        let mut bytes = Vec::new();
        storage
            .seek(SeekFrom::Start(cursor.offset))
            .and_then(|_| storage.read_to_end(&mut bytes))
            .map_err(|source| LogError::Read {
                offset: cursor.offset,
                source,
            })?;

        let mut frames = FrameReader::new(&bytes);
        let mut applied = 0u64;

        let result = loop {
            let Some(frame) = frames.next_frame() else {
                break Ok(applied);
            };

            if let Err(e) = self.apply_record(frame.record, *cursor, state) {
                break Err(e);
            }
            cursor.offset += frame.len;
            cursor.index += 1;
            applied += 1;
        };

        match &result {
            Ok(applied) => tracing::info!(applied, "replayed"),
            Err(e) => tracing::error!(applied, error = %e, "replay stopped"),
        }

        result
    }

    fn apply_record(
        &self,
        record: Result<StoredRecord, serde_json::Error>,
        at: Position,
        state: &mut O::State,
    ) -> Result<(), LogError> {
        let index = at.index;
        let record = record.map_err(|source| LogError::CorruptEntry {
            index,
            offset: at.offset,
            source,
        })?;

        let (tag, variant) = record
            .checked_tag()
            .and_then(|tag| Some((tag, self.registry.variant_for(tag)?)))
            .ok_or(LogError::OutOfRangeTag {
                index,
                tag: record.tag,
                known: self.registry.len(),
            })?;
        let kind = variant.name();

        let op = variant
            .decode(&record.payload)
            .map_err(|reason| LogError::Decode {
                index,
                tag,
                kind,
                reason,
            })?;

        tracing::trace!(index, %tag, kind, "applying");
        op.apply(state).map_err(|e| LogError::Apply {
            index,
            tag,
            kind,
            source: Box::new(e),
        })
    }

    /// Move the read cursor back to the start of the log
    pub fn rewind(&self) -> Result<(), LogError> {
        let mut guard = self.lock();
        let Inner { storage, cursor } = &mut *guard;
        let storage = storage.as_mut().ok_or(LogError::Closed)?;

        storage.seek(SeekFrom::Start(0)).map_err(LogError::Seek)?;
        *cursor = Position::default();
        tracing::debug!("rewound");
        Ok(())
    }

    /// Force appended records to stable storage.
    ///
    /// Only needed with [`SyncPolicy::Manual`].
    pub fn sync(&self) -> Result<(), LogError> {
        let mut inner = self.lock();
        let storage = inner.storage.as_mut().ok_or(LogError::Closed)?;
        storage.sync().map_err(LogError::Sync)
    }

    /// Close the log and release its storage.
    ///
    /// Every later call, including another close, fails with
    /// [`LogError::Closed`].
    pub fn close(&self) -> Result<(), LogError> {
        let storage = self.lock().storage.take().ok_or(LogError::Closed)?;
        let result = storage.close().map_err(LogError::Close);
        match &result {
            Ok(()) => tracing::debug!("closed"),
            Err(e) => tracing::warn!(error = %e, "close failed"),
        }
        result
    }

    /// Consume the log and hand back its storage without closing it
    pub fn into_inner(self) -> Result<S, LogError> {
        let inner = self.inner.into_inner().unwrap_or_else(|e| e.into_inner());
        inner.storage.ok_or(LogError::Closed)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // A panic inside a caller's apply poisons the lock; the cursor is
        // still consistent, so keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
