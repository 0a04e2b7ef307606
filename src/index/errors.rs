//! Index error types
//!
//! Data-shape situations (unknown attribute, empty query, missing
//! secondary attribute) are defined outcomes, not errors. The errors here
//! are the fatal class: broken invariants that must not be locally
//! recovered.
//!
//! Error codes:
//! - FACET_KIND_MISMATCH (FATAL)
//! - FACET_INDEX_CORRUPTION (FATAL)

use std::fmt;

use super::value::ValueKind;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Invariant broken; the caller must abort, not recover
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// A value of one kind was used against an attribute of another kind
    KindMismatch,
    /// Index bookkeeping disagrees with its own recorded memberships
    IndexCorruption,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::KindMismatch => "FACET_KIND_MISMATCH",
            IndexErrorCode::IndexCorruption => "FACET_INDEX_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal // All index errors are FATAL
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
}

impl IndexError {
    /// Create a kind mismatch error
    pub fn kind_mismatch(expected: ValueKind, got: ValueKind) -> Self {
        Self {
            code: IndexErrorCode::KindMismatch,
            message: format!("attribute indexed as {expected}, got {got}"),
        }
    }

    /// Create an index corruption error
    pub fn corruption(detail: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::IndexCorruption,
            message: detail.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        true // All index errors are FATAL
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(IndexErrorCode::KindMismatch.code(), "FACET_KIND_MISMATCH");
        assert_eq!(
            IndexErrorCode::IndexCorruption.code(),
            "FACET_INDEX_CORRUPTION"
        );
    }

    #[test]
    fn test_all_errors_are_fatal() {
        assert_eq!(IndexErrorCode::KindMismatch.severity(), Severity::Fatal);
        assert_eq!(IndexErrorCode::IndexCorruption.severity(), Severity::Fatal);
    }

    #[test]
    fn test_error_display() {
        let err = IndexError::kind_mismatch(ValueKind::Int32, ValueKind::Text);
        let display = format!("{}", err);
        assert!(display.contains("FATAL"));
        assert!(display.contains("FACET_KIND_MISMATCH"));
        assert!(display.contains("int32"));
        assert!(display.contains("text"));
    }
}
