//! facetdb - an embeddable, in-process secondary-index engine
//!
//! Stores opaque JSON documents and maintains one ordered index per named
//! attribute. Conjunctive queries (range and set-membership predicates over
//! several attributes at once) are answered by picking the most selective
//! condition as the driver, using continuously adapted per-attribute
//! selectivity statistics.
//!
//! The engine holds all state with a single owner and provides no internal
//! locking: it is safe under an external single-writer discipline only.
//!
//! ```
//! use facetdb::Engine;
//! use serde_json::json;
//!
//! let mut engine = Engine::new();
//! engine
//!     .new_document(json!({"word": "alpha"}))
//!     .int32_key("len", 5)
//!     .string_key("kind", "word");
//!
//! let result = engine.query().int32_range_filter("len", 1, 10).exec();
//! assert_eq!(result.len(), 1);
//! ```

pub mod engine;
pub mod index;
pub mod observability;
pub mod query;

pub use engine::{DocId, Document, DocumentMut, Engine, EngineConfig, IndexStats};
pub use index::{AttributeKey, IndexError, IndexErrorCode, IndexResult, Value, ValueKind};
pub use observability::{Event, LogLevel, Logger};
pub use query::{Query, QueryResult};
