//! Engine subsystem for facetdb
//!
//! # Design Principles
//!
//! 1. Single ownership: the engine owns interner, indexes, statistics
//!    and documents; nothing holds references across operations
//! 2. Lazy indexes: an attribute index exists only once a document was
//!    attached under its name
//! 3. Deletion is exact: a document's recorded values say precisely
//!    which index memberships to remove
//!
//! # Invariants
//!
//! - Document handles are monotonically assigned and never reused
//! - Every recorded (key, value) pair on a live document corresponds to
//!   exactly one membership in that key's index
//! - Attribute keys, once interned, stay valid for the engine's lifetime

mod config;
mod document;
mod engine;
mod stats;

pub use config::{EngineConfig, DEFAULT_SMOOTHING_RATE};
pub use document::{DocId, Document};
pub use engine::{DocumentMut, Engine, IndexStats};
pub use stats::SelectivityStats;
