//! Documents: opaque payload plus recorded attribute values
//!
//! A document records, per attribute key, every value it is currently
//! attached under. Absence of a key means "a filter on this attribute
//! cannot match", never "matches everything".

use ahash::AHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::index::{AttributeKey, Value};

/// Opaque document handle; monotonically assigned, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocId(u64);

impl DocId {
    pub(crate) fn new(raw: u64) -> Self {
        DocId(raw)
    }

    /// Returns the raw handle value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Values recorded per key; a single value is the common case
type RecordedValues = SmallVec<[Value; 1]>;

/// An indexed document: opaque JSON payload plus recorded attachments.
#[derive(Debug, Clone)]
pub struct Document {
    payload: serde_json::Value,
    pub(crate) keys: AHashMap<AttributeKey, RecordedValues>,
}

impl Document {
    pub(crate) fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            keys: AHashMap::new(),
        }
    }

    /// Returns the opaque payload
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Returns every value recorded under `key`, if the document is
    /// attached to that attribute
    pub fn values(&self, key: AttributeKey) -> Option<&[Value]> {
        self.keys.get(&key).map(|values| values.as_slice())
    }

    /// Returns the number of attributes this document is attached to
    pub fn attribute_count(&self) -> usize {
        self.keys.len()
    }

    /// Record one attachment. Multiple values per key are kept; every
    /// recorded value corresponds to exactly one index membership.
    pub(crate) fn record(&mut self, key: AttributeKey, value: Value) {
        self.keys.entry(key).or_default().push(value);
    }
}
