//! Query subsystem for facetdb
//!
//! # Design Principles
//!
//! 1. Conjunction only: every condition must hold for a document to match
//! 2. Cost-based driving: the cheapest condition walks its index, the
//!    rest filter candidates against recorded document values
//! 3. Adaptive: range drivers fold what they observed back into the
//!    statistics, so plans improve as the workload repeats
//!
//! # Invariants
//!
//! - Results contain only live documents
//! - A document matches a condition if any of its recorded values for
//!   that attribute matches
//! - Estimate ties resolve to the earliest condition added

mod condition;
mod query;
mod result;

pub use query::Query;
pub use result::QueryResult;
