//! Adaptive selectivity statistics
//!
//! One slot per interned attribute key holding the most recent observed
//! selectivity sample. Keyed densely by the stable key, not by name, so a
//! lookup is an array access with no hashing and no collisions.
//!
//! Samples are written only after a Range condition served as a query
//! driver; estimation prefers this last observation and falls back to the
//! attribute index's own moving average.

use crate::index::AttributeKey;

/// Most recent observed selectivity per attribute key.
#[derive(Debug, Default)]
pub struct SelectivityStats {
    observed: Vec<Option<f32>>,
}

impl SelectivityStats {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the table to cover `key`
    pub(crate) fn ensure_key(&mut self, key: AttributeKey) {
        if key.index() >= self.observed.len() {
            self.observed.resize(key.index() + 1, None);
        }
    }

    /// Returns the last observed sample for `key`, if any query on that
    /// attribute ever drove an execution
    pub fn last_observed(&self, key: AttributeKey) -> Option<f32> {
        self.observed.get(key.index()).copied().flatten()
    }

    /// Record an observed sample for `key`
    pub(crate) fn observe(&mut self, key: AttributeKey, sample: f32) {
        self.ensure_key(key);
        self.observed[key.index()] = Some(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: u32) -> AttributeKey {
        AttributeKey::new(raw)
    }

    #[test]
    fn test_unobserved_key_is_none() {
        let stats = SelectivityStats::new();
        assert_eq!(stats.last_observed(key(0)), None);
        assert_eq!(stats.last_observed(key(42)), None);
    }

    #[test]
    fn test_observe_and_read_back() {
        let mut stats = SelectivityStats::new();
        stats.observe(key(2), 0.25);

        assert_eq!(stats.last_observed(key(2)), Some(0.25));
        assert_eq!(stats.last_observed(key(0)), None);
        assert_eq!(stats.last_observed(key(1)), None);
    }

    #[test]
    fn test_observe_overwrites() {
        let mut stats = SelectivityStats::new();
        stats.observe(key(0), 0.9);
        stats.observe(key(0), 0.1);
        assert_eq!(stats.last_observed(key(0)), Some(0.1));
    }
}
