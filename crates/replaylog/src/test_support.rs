// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests: a small key-value operation set and a
//! storage that fails on demand.

use crate::{Operation, Storage, Variant};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

pub type Kv = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    #[serde(rename = "k")]
    pub key: String,
    #[serde(rename = "v")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(rename = "k")]
    pub key: String,
}

/// Moves a value to a new key; fails if the source is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KvOp {
    Set(Set),
    Delete(Delete),
    Rename(Rename),
    /// Never registered; exercises the unregistered path
    Clear,
}

impl From<Set> for KvOp {
    fn from(op: Set) -> Self {
        KvOp::Set(op)
    }
}

impl From<Delete> for KvOp {
    fn from(op: Delete) -> Self {
        KvOp::Delete(op)
    }
}

impl From<Rename> for KvOp {
    fn from(op: Rename) -> Self {
        KvOp::Rename(op)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no such key: {0}")]
pub struct MissingKey(pub String);

impl Operation for KvOp {
    type State = Kv;
    type Error = MissingKey;

    fn kind(&self) -> &'static str {
        match self {
            KvOp::Set(_) => "set",
            KvOp::Delete(_) => "delete",
            KvOp::Rename(_) => "rename",
            KvOp::Clear => "clear",
        }
    }

    fn encode(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            KvOp::Set(op) => serde_json::to_value(op),
            KvOp::Delete(op) => serde_json::to_value(op),
            KvOp::Rename(op) => serde_json::to_value(op),
            KvOp::Clear => Ok(serde_json::Value::Null),
        }
    }

    fn apply(&self, state: &mut Kv) -> Result<(), MissingKey> {
        match self {
            KvOp::Set(op) => {
                state.insert(op.key.clone(), op.value.clone());
            }
            KvOp::Delete(op) => {
                state.remove(&op.key);
            }
            KvOp::Rename(op) => {
                let value = state
                    .remove(&op.from)
                    .ok_or_else(|| MissingKey(op.from.clone()))?;
                state.insert(op.to.clone(), value);
            }
            KvOp::Clear => state.clear(),
        }
        Ok(())
    }
}

pub fn variants() -> Vec<Variant<KvOp>> {
    vec![
        Variant::of::<Set>("set"),
        Variant::of::<Delete>("delete"),
        Variant::of::<Rename>("rename"),
    ]
}

pub fn set(key: &str, value: &str) -> KvOp {
    KvOp::Set(Set {
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub fn delete(key: &str) -> KvOp {
    KvOp::Delete(Delete {
        key: key.to_string(),
    })
}

pub fn rename(from: &str, to: &str) -> KvOp {
    KvOp::Rename(Rename {
        from: from.to_string(),
        to: to.to_string(),
    })
}

pub fn kv(pairs: &[(&str, &str)]) -> Kv {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Which storage call should fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Faults {
    pub write: bool,
    pub sync: bool,
    pub seek: bool,
    pub close: bool,
}

/// In-memory storage with injectable failures
#[derive(Debug, Default)]
pub struct FaultyStorage {
    pub data: Cursor<Vec<u8>>,
    pub faults: Faults,
    pub syncs: usize,
}

impl FaultyStorage {
    pub fn new(faults: Faults) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }

    pub fn with_bytes(bytes: &[u8]) -> Self {
        Self {
            data: Cursor::new(bytes.to_vec()),
            ..Self::default()
        }
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::other(format!("injected {what} failure"))
}

impl Read for FaultyStorage {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Write for FaultyStorage {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.faults.write {
            return Err(injected("write"));
        }
        self.data.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FaultyStorage {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.faults.seek {
            return Err(injected("seek"));
        }
        self.data.seek(pos)
    }
}

impl Storage for FaultyStorage {
    fn sync(&mut self) -> io::Result<()> {
        if self.faults.sync {
            return Err(injected("sync"));
        }
        self.syncs += 1;
        Ok(())
    }

    fn close(self) -> io::Result<()> {
        if self.faults.close {
            return Err(injected("close"));
        }
        Ok(())
    }
}
