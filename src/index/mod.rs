//! Attribute index subsystem for facetdb
//!
//! One ordered value-to-documents index per attribute name, addressed by a
//! stable interned key.
//!
//! # Design Principles
//!
//! - Ordered: BTreeMap slots give ascending range scans over values
//! - Bounded: empty value slots are dropped, the tree holds live values only
//! - Kind-locked: an attribute's value kind is fixed by its first insert
//!
//! # Invariants
//!
//! - An attribute name maps to exactly one key for the engine's lifetime
//! - `count` tracks live (document, value) memberships exactly
//! - Values of different kinds are never compared

mod errors;
mod interner;
mod tree;
mod value;

pub use errors::{IndexError, IndexErrorCode, IndexResult, Severity};
pub use interner::{AttributeKey, KeyInterner};
pub use tree::AttributeIndex;
pub use value::{Value, ValueKind};
