// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame codec: each record is one self-delimiting JSON object

use crate::registry::Tag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The durable unit written to the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Variant tag
    #[serde(rename = "k")]
    pub tag: Tag,
    /// Encoded operation fields
    #[serde(rename = "e")]
    pub payload: Value,
}

/// A record as read back from the log, before its tag is checked.
///
/// The tag is kept signed and wide so that a stream written by a newer or
/// foreign writer still decodes, and a tag no registry can hold is reported
/// as out of range instead of as corruption.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredRecord {
    #[serde(rename = "k")]
    pub tag: i64,
    #[serde(rename = "e")]
    pub payload: Value,
}

impl StoredRecord {
    /// The tag, if it fits in a [`Tag`] at all
    pub fn checked_tag(&self) -> Option<Tag> {
        u32::try_from(self.tag).ok().map(Tag)
    }
}

/// Serialize a record into its on-disk bytes.
///
/// The trailing newline only keeps the file readable. Readers never rely
/// on it.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec(record)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a single record that fills `frame`, surrounding whitespace aside
pub fn decode_record(frame: &[u8]) -> Result<StoredRecord, serde_json::Error> {
    serde_json::from_slice(frame)
}

/// A frame read from the stream, decoded or not
#[derive(Debug)]
pub struct Frame {
    /// Bytes the frame occupies, whitespace up to the next record included.
    ///
    /// A frame that fails to decode has no known end and spans the rest of
    /// the stream.
    pub len: u64,
    pub record: Result<StoredRecord, serde_json::Error>,
}

/// Reads frames sequentially from a byte stream.
///
/// Records are delimited by their own JSON encoding, so back-to-back
/// objects and records spread over several lines both read fine.
pub struct FrameReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn consumed(&self) -> u64 {
        self.pos as u64
    }

    /// Read the next frame, or `None` once only whitespace remains.
    ///
    /// Whitespace before a record counts toward that record, and whitespace
    /// after it counts toward it too, so consecutive frame lengths always
    /// add up to the bytes consumed.
    pub fn next_frame(&mut self) -> Option<Frame> {
        let rest = self.bytes.get(self.pos..).unwrap_or_default();
        let mut stream = serde_json::Deserializer::from_slice(rest).into_iter::<StoredRecord>();

        let frame = match stream.next()? {
            Ok(record) => {
                let mut end = stream.byte_offset();
                while rest.get(end).is_some_and(|b| is_json_whitespace(*b)) {
                    end += 1;
                }
                Frame {
                    len: end as u64,
                    record: Ok(record),
                }
            }
            Err(e) => Frame {
                len: rest.len() as u64,
                record: Err(e),
            },
        };

        self.pos += frame.len as usize;
        Some(frame)
    }
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
