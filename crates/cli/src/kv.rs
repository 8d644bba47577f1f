// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-value operations recorded in the log

use replaylog::{Operation, Variant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Materialized key-value state
pub type KvState = BTreeMap<String, String>;

/// Assign `value` to `key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    #[serde(rename = "k")]
    pub key: String,
    #[serde(rename = "v")]
    pub value: String,
}

/// Remove `key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(rename = "k")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KvOp {
    Set(Set),
    Delete(Delete),
}

impl KvOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        KvOp::Set(Set {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn delete(key: impl Into<String>) -> Self {
        KvOp::Delete(Delete { key: key.into() })
    }
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

impl Operation for KvOp {
    type State = KvState;
    type Error = Infallible;

    fn kind(&self) -> &'static str {
        match self {
            KvOp::Set(_) => "set",
            KvOp::Delete(_) => "delete",
        }
    }

    fn encode(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            KvOp::Set(op) => serde_json::to_value(op),
            KvOp::Delete(op) => serde_json::to_value(op),
        }
    }

    fn apply(&self, state: &mut KvState) -> Result<(), Infallible> {
        match self {
            KvOp::Set(op) => {
                state.insert(op.key.clone(), op.value.clone());
            }
            KvOp::Delete(op) => {
                state.remove(&op.key);
            }
        }
        Ok(())
    }
}

/// Registered variants. Order is the on-disk tag; only ever append.
pub fn variants() -> [Variant<KvOp>; 2] {
    [Variant::of::<Set>("set"), Variant::of::<Delete>("delete")]
}
