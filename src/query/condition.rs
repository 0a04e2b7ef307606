//! Query conditions: half-open ranges and exact-value sets

use ahash::AHashSet;

use crate::engine::{DocId, SelectivityStats};
use crate::index::{AttributeIndex, AttributeKey, Value};

/// One filter over a single attribute.
///
/// Every variant both matches individual values and walks its attribute
/// index, so any condition can serve as the query driver.
#[derive(Debug, Clone)]
pub(crate) enum Condition {
    /// Matches values in `[greater_or_equal, less_than)`
    Range {
        key: AttributeKey,
        greater_or_equal: Value,
        less_than: Value,
    },
    /// Matches values equal to any member
    Set {
        key: AttributeKey,
        values: AHashSet<Value>,
    },
}

impl Condition {
    pub(crate) fn range(key: AttributeKey, greater_or_equal: Value, less_than: Value) -> Self {
        Condition::Range {
            key,
            greater_or_equal,
            less_than,
        }
    }

    pub(crate) fn set(key: AttributeKey, values: impl IntoIterator<Item = Value>) -> Self {
        Condition::Set {
            key,
            values: values.into_iter().collect(),
        }
    }

    pub(crate) fn attribute_key(&self) -> AttributeKey {
        match self {
            Condition::Range { key, .. } => *key,
            Condition::Set { key, .. } => *key,
        }
    }

    /// Tests one recorded value against this condition
    pub(crate) fn matches(&self, value: &Value) -> bool {
        match self {
            Condition::Range {
                greater_or_equal,
                less_than,
                ..
            } => value >= greater_or_equal && value < less_than,
            Condition::Set { values, .. } => values.contains(value),
        }
    }

    /// Estimates the fraction of `index` entries this condition matches.
    ///
    /// A range estimate prefers the last observed sample for the
    /// attribute and falls back to the index's moving average. A set
    /// estimate is exact: the member slots are counted directly.
    pub(crate) fn estimate_selectivity(
        &self,
        index: &AttributeIndex,
        stats: &SelectivityStats,
    ) -> f32 {
        match self {
            Condition::Range { key, .. } => stats
                .last_observed(*key)
                .unwrap_or_else(|| index.avg_selectivity()),
            Condition::Set { values, .. } => {
                if index.count() == 0 {
                    return 0.0;
                }
                let member_entries: usize = values
                    .iter()
                    .filter_map(|value| index.docs_for(value))
                    .map(<[DocId]>::len)
                    .sum();
                member_entries as f32 / index.count() as f32
            }
        }
    }

    /// Walks every matching membership in `index`, in value order for
    /// ranges and in unspecified order for sets. Stops early when the
    /// visitor returns false.
    pub(crate) fn iterate(&self, index: &AttributeIndex, mut visit: impl FnMut(DocId) -> bool) {
        match self {
            Condition::Range {
                greater_or_equal,
                less_than,
                ..
            } => {
                index.ascend_range(greater_or_equal, less_than, |_, docs| {
                    for doc in docs {
                        if !visit(*doc) {
                            return false;
                        }
                    }
                    true
                });
            }
            Condition::Set { values, .. } => {
                for value in values {
                    let Some(docs) = index.docs_for(value) else {
                        continue;
                    };
                    for doc in docs {
                        if !visit(*doc) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Folds the observed match fraction into the statistics after this
    /// condition drove an execution. Set conditions estimate exactly and
    /// never refresh.
    pub(crate) fn refresh_selectivity(
        &self,
        index: &mut AttributeIndex,
        stats: &mut SelectivityStats,
        matched: usize,
        rate: f32,
    ) {
        match self {
            Condition::Range { key, .. } => {
                if index.count() == 0 {
                    return;
                }
                let sample = matched as f32 / index.count() as f32;
                index.fold_selectivity(sample, rate);
                stats.observe(*key, sample);
            }
            Condition::Set { .. } => {}
        }
    }
}
