//! Query results

use crate::engine::DocId;

/// The outcome of one query execution.
///
/// Holds matching document handles in driver iteration order plus the
/// number of candidates the driver produced before filtering.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    matches: Vec<DocId>,
    scanned_count: usize,
}

impl QueryResult {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(matches: Vec<DocId>, scanned_count: usize) -> Self {
        Self {
            matches,
            scanned_count,
        }
    }

    /// Returns the matching document handles
    pub fn ids(&self) -> &[DocId] {
        &self.matches
    }

    /// Returns the number of matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the number of candidates the driver produced
    pub fn scanned_count(&self) -> usize {
        self.scanned_count
    }

    /// Iterates the matching document handles
    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.matches.iter().copied()
    }

    /// Consumes the result, yielding the match vector
    pub fn into_ids(self) -> Vec<DocId> {
        self.matches
    }
}

impl IntoIterator for QueryResult {
    type Item = DocId;
    type IntoIter = std::vec::IntoIter<DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.scanned_count(), 0);
    }

    #[test]
    fn test_matches_and_scanned() {
        let result = QueryResult::new(vec![DocId::new(3), DocId::new(7)], 5);
        assert_eq!(result.len(), 2);
        assert_eq!(result.scanned_count(), 5);
        assert_eq!(
            result.iter().map(DocId::as_u64).collect::<Vec<_>>(),
            vec![3, 7]
        );
        assert_eq!(result.into_ids().len(), 2);
    }
}
