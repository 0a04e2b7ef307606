//! Query builder, planner and executor
//!
//! A query is a conjunction of typed conditions. Planning picks the
//! condition with the lowest estimated selectivity as the driver; the
//! driver walks its attribute index while the remaining conditions
//! filter each candidate against the values recorded on its document.

use ahash::AHashSet;

use crate::engine::Engine;
use crate::index::{AttributeKey, IndexError, Value, ValueKind};
use crate::observability::Event;

use super::condition::Condition;
use super::result::QueryResult;

/// A query under construction against one engine.
///
/// Filters referencing attribute names no document was ever attached
/// under are dropped silently; such a condition could never match and
/// would otherwise force an empty result.
pub struct Query<'a> {
    engine: &'a mut Engine,
    conditions: Vec<Condition>,
}

impl<'a> Query<'a> {
    pub(crate) fn new(engine: &'a mut Engine) -> Self {
        Self {
            engine,
            conditions: Vec::new(),
        }
    }

    /// Filters on `name` in the half-open interval `[ge, lt)`
    pub fn int32_range_filter(self, name: &str, ge: i32, lt: i32) -> Self {
        self.range_filter(name, Value::int32(ge), Value::int32(lt))
    }

    /// Filters on `name` in the half-open interval `[ge, lt)`
    pub fn int8_range_filter(self, name: &str, ge: i8, lt: i8) -> Self {
        self.range_filter(name, Value::int8(ge), Value::int8(lt))
    }

    /// Filters on `name` in the half-open interval `[ge, lt)`
    pub fn float32_range_filter(self, name: &str, ge: f32, lt: f32) -> Self {
        self.range_filter(name, Value::float32(ge), Value::float32(lt))
    }

    /// Filters on `name` in the half-open interval `[ge, lt)`, ordered
    /// bytewise
    pub fn string_range_filter(
        self,
        name: &str,
        ge: impl Into<String>,
        lt: impl Into<String>,
    ) -> Self {
        self.range_filter(name, Value::text(ge), Value::text(lt))
    }

    /// Filters on `name` matching any of `values`
    pub fn int32_in_filter(self, name: &str, values: impl IntoIterator<Item = i32>) -> Self {
        self.in_filter(name, values.into_iter().map(Value::int32))
    }

    /// Filters on `name` matching any of `values`
    pub fn int8_in_filter(self, name: &str, values: impl IntoIterator<Item = i8>) -> Self {
        self.in_filter(name, values.into_iter().map(Value::int8))
    }

    /// Filters on `name` matching any of `values`
    pub fn float32_in_filter(self, name: &str, values: impl IntoIterator<Item = f32>) -> Self {
        self.in_filter(name, values.into_iter().map(Value::float32))
    }

    /// Filters on `name` matching any of `values`
    pub fn string_in_filter<S: Into<String>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.in_filter(name, values.into_iter().map(Value::text))
    }

    fn range_filter(mut self, name: &str, greater_or_equal: Value, less_than: Value) -> Self {
        let Some(key) = self.engine.attribute_key(name) else {
            return self;
        };
        self.check_kind(name, key, greater_or_equal.kind());
        self.conditions
            .push(Condition::range(key, greater_or_equal, less_than));
        self
    }

    fn in_filter(mut self, name: &str, values: impl IntoIterator<Item = Value>) -> Self {
        let Some(key) = self.engine.attribute_key(name) else {
            return self;
        };
        let values: Vec<Value> = values.into_iter().collect();
        if let Some(first) = values.first() {
            self.check_kind(name, key, first.kind());
        }
        self.conditions.push(Condition::set(key, values));
        self
    }

    fn check_kind(&self, name: &str, key: AttributeKey, got: ValueKind) {
        if let Some(expected) = self.engine.index_for(key).kind() {
            if expected != got {
                panic!(
                    "filter on attribute {name:?}: {}",
                    IndexError::kind_mismatch(expected, got)
                );
            }
        }
    }

    /// Plans and executes the query, returning the matching documents.
    ///
    /// Consumes the builder. Range drivers fold the observed match
    /// fraction back into the statistics; a query with no conditions
    /// matches nothing.
    pub fn exec(self) -> QueryResult {
        let Query { engine, conditions } = self;
        if conditions.is_empty() {
            engine
                .logger()
                .trace(Event::QueryExecuted, &[("matched", "0"), ("scanned", "0")]);
            return QueryResult::empty();
        }

        // Plan: lowest estimate drives; ties keep the earliest condition
        let stats = engine.selectivity_stats();
        let mut driver = 0;
        let mut best = f32::INFINITY;
        for (position, condition) in conditions.iter().enumerate() {
            let index = engine.index_for(condition.attribute_key());
            let estimate = condition.estimate_selectivity(index, stats);
            if estimate < best {
                best = estimate;
                driver = position;
            }
        }
        let driver_key = conditions[driver].attribute_key();
        {
            let key = driver_key.as_u32().to_string();
            let estimate = best.to_string();
            let count = conditions.len().to_string();
            engine.logger().trace(
                Event::QueryPlanned,
                &[
                    ("conditions", &count),
                    ("driver_key", &key),
                    ("estimate", &estimate),
                ],
            );
        }

        // Execute: walk the driver, filter candidates by recorded values.
        // A document attached under several matching values is produced
        // once per membership; it must match and be emitted at most once.
        let mut matches = Vec::new();
        let mut seen = AHashSet::new();
        let mut scanned = 0usize;
        {
            let index = engine.index_for(driver_key);
            let documents = engine.documents();
            conditions[driver].iterate(index, |doc_id| {
                scanned += 1;
                if !seen.insert(doc_id) {
                    return true;
                }
                let Some(doc) = documents.get(&doc_id) else {
                    panic!(
                        "{}",
                        IndexError::corruption(format!(
                            "index entry for vanished document {}",
                            doc_id.as_u64()
                        ))
                    );
                };
                let satisfied = conditions.iter().enumerate().all(|(position, condition)| {
                    if position == driver {
                        return true;
                    }
                    match doc.values(condition.attribute_key()) {
                        Some(values) => values.iter().any(|value| condition.matches(value)),
                        None => false,
                    }
                });
                if satisfied {
                    matches.push(doc_id);
                }
                true
            });
        }

        let rate = engine.config().selectivity_smoothing_rate;
        let (index, stats) = engine.index_and_stats_mut(driver_key);
        conditions[driver].refresh_selectivity(index, stats, matches.len(), rate);

        {
            let matched = matches.len().to_string();
            let scanned_str = scanned.to_string();
            engine.logger().trace(
                Event::QueryExecuted,
                &[("matched", &matched), ("scanned", &scanned_str)],
            );
        }

        QueryResult::new(matches, scanned)
    }

    #[cfg(test)]
    pub(crate) fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}
