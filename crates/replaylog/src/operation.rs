// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The operation contract implemented by callers

/// A single state mutation recorded in the log.
///
/// Implement this on a closed enum with one arm per operation variant, and
/// register each arm with [`crate::Variant::of`] in a fixed order. The order is
/// the on-disk tag assignment: variants may be appended but never reordered
/// or removed while any log written with them still exists.
pub trait Operation: Sized {
    /// State the operation mutates (e.g. a map being rebuilt)
    type State;

    /// Domain error reported by [`Operation::apply`]
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of this value's variant, matched against registered names
    fn kind(&self) -> &'static str;

    /// Serialize the variant's fields as the record payload
    fn encode(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Apply the mutation to `state`
    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;
}
