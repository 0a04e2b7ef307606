//! Per-attribute ordered index
//!
//! One `AttributeIndex` per attribute name: an ordered map from value to
//! the documents holding exactly that value, plus a live membership count
//! and an adaptively updated average selectivity.
//!
//! # Invariants
//!
//! - `count` equals the number of (document, value) memberships indexed
//! - a value slot is dropped as soon as its last membership is removed,
//!   so the tree is bounded by live values
//! - the value kind is locked by the first insert and never changes

use std::collections::BTreeMap;
use std::ops::Bound;

use smallvec::SmallVec;

use super::errors::{IndexError, IndexResult};
use super::value::{Value, ValueKind};
use crate::engine::DocId;

/// Documents holding one exact value; most values are held by few documents
type ValueSlot = SmallVec<[DocId; 4]>;

/// Ordered value-to-documents index for a single attribute.
#[derive(Debug, Default)]
pub struct AttributeIndex {
    slots: BTreeMap<Value, ValueSlot>,
    kind: Option<ValueKind>,
    count: usize,
    avg_selectivity: f32,
}

impl AttributeIndex {
    /// Creates a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a membership for `doc` under `value`.
    ///
    /// The first insert locks the index to that value kind; later inserts
    /// of another kind are rejected. Re-inserting the same (value, doc)
    /// pair is not deduplicated: it adds a second membership.
    pub fn insert(&mut self, value: Value, doc: DocId) -> IndexResult<()> {
        match self.kind {
            None => self.kind = Some(value.kind()),
            Some(kind) if kind != value.kind() => {
                return Err(IndexError::kind_mismatch(kind, value.kind()));
            }
            Some(_) => {}
        }
        self.slots.entry(value).or_default().push(doc);
        self.count += 1;
        Ok(())
    }

    /// Remove one membership for `doc` under `value`.
    ///
    /// Removes the first matching membership only; a document attached
    /// twice under the same value needs two removes. Dropping the last
    /// membership of a value removes the value slot entirely.
    pub fn remove(&mut self, value: &Value, doc: DocId) {
        if let Some(docs) = self.slots.get_mut(value) {
            if let Some(pos) = docs.iter().position(|d| *d == doc) {
                docs.remove(pos);
                self.count -= 1;
                if docs.is_empty() {
                    self.slots.remove(value);
                }
            }
        }
    }

    /// Visit every value slot with `greater_or_equal <= value < less_than`
    /// in ascending value order. The visitor returns `false` to stop early.
    pub fn ascend_range<F>(&self, greater_or_equal: &Value, less_than: &Value, mut visit: F)
    where
        F: FnMut(&Value, &[DocId]) -> bool,
    {
        if greater_or_equal >= less_than {
            return; // Empty half-open interval
        }
        let range = (Bound::Included(greater_or_equal), Bound::Excluded(less_than));
        for (value, docs) in self.slots.range::<Value, _>(range) {
            if !visit(value, docs) {
                return;
            }
        }
    }

    /// Returns the documents holding exactly `value`, if any
    pub fn docs_for(&self, value: &Value) -> Option<&[DocId]> {
        self.slots.get(value).map(|docs| docs.as_slice())
    }

    /// Returns the number of live (document, value) memberships
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the number of distinct indexed values
    pub fn distinct_values(&self) -> usize {
        self.slots.len()
    }

    /// Returns the value kind this index is locked to, if any insert happened
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    /// Returns the moving-average selectivity observed for this attribute
    pub fn avg_selectivity(&self) -> f32 {
        self.avg_selectivity
    }

    /// Fold an observed selectivity sample into the moving average.
    ///
    /// `avg = avg * (1 - rate) + sample * rate`; with sample and rate in
    /// [0, 1] the average stays in [0, 1] by construction.
    pub fn fold_selectivity(&mut self, sample: f32, rate: f32) {
        self.avg_selectivity = self.avg_selectivity * (1.0 - rate) + sample * rate;
    }
}
