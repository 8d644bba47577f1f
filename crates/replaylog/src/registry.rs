// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation registry: stable mapping between variants and integer tags

use crate::error::LogError;
use crate::operation::Operation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Position of a variant in the registration list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type DecodeFn<O> = fn(&Value) -> Result<O, String>;

/// Factory entry for one operation variant
pub struct Variant<O> {
    name: &'static str,
    decode: DecodeFn<O>,
}

impl<O> Variant<O> {
    /// Register payload type `T` under `name`.
    ///
    /// Decoded payloads are converted into the operation enum with `From<T>`.
    pub fn of<T>(name: &'static str) -> Self
    where
        T: DeserializeOwned + Into<O>,
    {
        Self {
            name,
            decode: decode_strict::<T, O>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a fresh operation from a record payload
    pub fn decode(&self, payload: &Value) -> Result<O, String> {
        (self.decode)(payload)
    }
}

impl<O> Clone for Variant<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            decode: self.decode,
        }
    }
}

impl<O> fmt::Debug for Variant<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant").field("name", &self.name).finish()
    }
}

/// Immutable tag <-> variant mapping, fixed at construction
#[derive(Debug)]
pub struct Registry<O> {
    variants: Vec<Variant<O>>,
    tags: HashMap<&'static str, Tag>,
}

impl<O> Registry<O> {
    /// Build a registry from an ordered variant list.
    ///
    /// Tags are assigned by position, so the same list always yields the same
    /// tags.
    pub fn new(variants: impl IntoIterator<Item = Variant<O>>) -> Result<Self, LogError> {
        let variants: Vec<_> = variants.into_iter().collect();
        if variants.is_empty() {
            return Err(LogError::NoVariants);
        }
        if u32::try_from(variants.len()).is_err() {
            return Err(LogError::TooManyVariants(variants.len()));
        }

        let mut tags = HashMap::with_capacity(variants.len());
        for (i, variant) in variants.iter().enumerate() {
            if tags.insert(variant.name, Tag(i as u32)).is_some() {
                return Err(LogError::DuplicateVariant { name: variant.name });
            }
        }

        Ok(Self { variants, tags })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Registered names in tag order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.name)
    }

    /// Look up the tag for a variant name
    pub fn tag_for_kind(&self, kind: &'static str) -> Result<Tag, LogError> {
        self.tags
            .get(kind)
            .copied()
            .ok_or(LogError::UnregisteredVariant { kind })
    }

    /// Variant registered at `tag`, if any
    pub fn variant_for(&self, tag: Tag) -> Option<&Variant<O>> {
        self.variants.get(tag.index())
    }
}

impl<O: Operation> Registry<O> {
    /// Look up the tag for an operation value
    pub fn tag_of(&self, op: &O) -> Result<Tag, LogError> {
        self.tag_for_kind(op.kind())
    }
}

/// Decode `payload` as `T`, failing on any key `T` does not declare.
///
/// Unknown keys are rejected at every depth, whatever their value.
fn decode_strict<T, O>(payload: &Value) -> Result<O, String>
where
    T: DeserializeOwned + Into<O>,
{
    let mut ignored = Vec::new();
    let decoded: T = serde_ignored::deserialize(payload, |path| ignored.push(path.to_string()))
        .map_err(|e| e.to_string())?;

    if !ignored.is_empty() {
        return Err(format!("unknown field `{}`", ignored.join("`, `")));
    }
    Ok(decoded.into())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
