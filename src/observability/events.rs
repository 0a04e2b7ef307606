//! Observable engine events
//!
//! Events are explicit and typed; every log line names exactly one.

use std::fmt;

/// Observable events in facetdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new attribute index was created on first attach of its name
    IndexCreated,
    /// A document and all its memberships were removed
    DocumentDeleted,
    /// An attach named a document that no longer exists and was ignored
    AttachSkipped,
    /// A driver condition was chosen for a query
    QueryPlanned,
    /// A query finished executing
    QueryExecuted,
    /// A value of the wrong kind was used against an attribute (FATAL)
    KindMismatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IndexCreated => "INDEX_CREATED",
            Event::DocumentDeleted => "DOCUMENT_DELETED",
            Event::AttachSkipped => "ATTACH_SKIPPED",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::KindMismatch => "KIND_MISMATCH",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::KindMismatch)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
