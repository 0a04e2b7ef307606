//! Observability subsystem for facetdb
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on engine behavior
//! 2. Synchronous, no background threads
//! 3. Deterministic output (sorted fields, typed events)
//! 4. Quiet by default: the engine logs at `Warn` unless configured

mod events;
mod logger;

pub use events::Event;
pub use logger::{LogLevel, Logger};
