//! The engine: single owner of interner, indexes, statistics and documents
//!
//! Documents never hold a reference back to the engine; every operation on
//! a document takes the engine as context, either explicitly or through
//! the borrowing [`DocumentMut`] handle. The engine provides no internal
//! locking and is safe only under an external single-writer discipline.

use ahash::AHashMap;
use serde::Serialize;

use super::config::EngineConfig;
use super::document::{DocId, Document};
use super::stats::SelectivityStats;
use crate::index::{AttributeIndex, AttributeKey, IndexResult, KeyInterner, Value, ValueKind};
use crate::observability::{Event, Logger};
use crate::query::Query;

/// Snapshot of one attribute index's bookkeeping.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    /// Live (document, value) memberships
    pub entry_count: usize,
    /// Distinct indexed values
    pub distinct_values: usize,
    /// Moving-average selectivity observed when driving queries
    pub avg_selectivity: f32,
    /// Value kind the index is locked to, if anything was ever attached
    pub kind: Option<ValueKind>,
}

/// The in-process secondary-index engine.
pub struct Engine {
    config: EngineConfig,
    logger: Logger,
    interner: KeyInterner,
    indexes: Vec<AttributeIndex>,
    stats: SelectivityStats,
    documents: AHashMap<DocId, Document>,
    next_doc_id: u64,
}

impl Engine {
    /// Creates an empty engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an empty engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            logger: Logger::new(config.log_level),
            config,
            interner: KeyInterner::new(),
            indexes: Vec::new(),
            stats: SelectivityStats::new(),
            documents: AHashMap::new(),
            next_doc_id: 0,
        }
    }

    /// Creates an engine routing log output through the given logger
    pub fn with_logger(config: EngineConfig, logger: Logger) -> Self {
        Self {
            logger,
            ..Self::with_config(config)
        }
    }

    /// Creates a new document holding `payload` and returns a chaining
    /// handle for attaching attribute values to it.
    pub fn new_document(&mut self, payload: serde_json::Value) -> DocumentMut<'_> {
        let id = DocId::new(self.next_doc_id);
        self.next_doc_id += 1;
        self.documents.insert(id, Document::new(payload));
        DocumentMut { engine: self, id }
    }

    /// Returns the document behind `id`, if it still exists
    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Returns a chaining attach handle for an existing document
    pub fn document_mut(&mut self, id: DocId) -> Option<DocumentMut<'_>> {
        if !self.documents.contains_key(&id) {
            return None;
        }
        Some(DocumentMut { engine: self, id })
    }

    /// Starts building a query against this engine
    pub fn query(&mut self) -> Query<'_> {
        Query::new(self)
    }

    /// Attach `value` under `name` to the document behind `id`.
    ///
    /// Interns the name (creating the attribute index on first use),
    /// inserts one index membership and records the value on the
    /// document. Attaching to a deleted document is a no-op. A kind
    /// mismatch against the attribute's locked kind is returned as a
    /// fatal error without touching any state.
    pub fn try_attach(&mut self, id: DocId, name: &str, value: Value) -> IndexResult<()> {
        if !self.documents.contains_key(&id) {
            self.logger.warn(
                Event::AttachSkipped,
                &[("attribute", name), ("detail", "attach on missing document")],
            );
            return Ok(());
        }

        let (key, created) = self.interner.intern(name);
        if created {
            self.indexes.push(AttributeIndex::new());
            self.stats.ensure_key(key);
            let raw = key.as_u32().to_string();
            self.logger
                .info(Event::IndexCreated, &[("attribute", name), ("key", &raw)]);
        }

        match self.indexes[key.index()].insert(value.clone(), id) {
            Ok(()) => {
                if let Some(doc) = self.documents.get_mut(&id) {
                    doc.record(key, value);
                }
                Ok(())
            }
            Err(err) => {
                self.logger.fatal(
                    Event::KindMismatch,
                    &[("attribute", name), ("detail", err.message())],
                );
                Err(err)
            }
        }
    }

    /// Delete the document behind `id`, removing every index membership
    /// it holds. Indexes shrink but are never removed, and the attribute
    /// keys stay interned. Deleting twice is a safe no-op returning false.
    pub fn delete(&mut self, id: DocId) -> bool {
        let Some(doc) = self.documents.remove(&id) else {
            return false;
        };
        for (key, values) in doc.keys {
            let index = &mut self.indexes[key.index()];
            for value in values {
                index.remove(&value, id);
            }
        }
        let raw = id.as_u64().to_string();
        self.logger.info(Event::DocumentDeleted, &[("doc", &raw)]);
        true
    }

    /// Returns the interned key for an attribute name, if any document
    /// was ever attached under it
    pub fn attribute_key(&self, name: &str) -> Option<AttributeKey> {
        self.interner.lookup(name)
    }

    /// Returns a bookkeeping snapshot for an attribute, if it exists
    pub fn index_stats(&self, name: &str) -> Option<IndexStats> {
        let key = self.interner.lookup(name)?;
        let index = &self.indexes[key.index()];
        Some(IndexStats {
            entry_count: index.count(),
            distinct_values: index.distinct_values(),
            avg_selectivity: index.avg_selectivity(),
            kind: index.kind(),
        })
    }

    /// Returns the number of live documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the engine holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn index_for(&self, key: AttributeKey) -> &AttributeIndex {
        &self.indexes[key.index()]
    }

    pub(crate) fn index_and_stats_mut(
        &mut self,
        key: AttributeKey,
    ) -> (&mut AttributeIndex, &mut SelectivityStats) {
        (&mut self.indexes[key.index()], &mut self.stats)
    }

    pub(crate) fn selectivity_stats(&self) -> &SelectivityStats {
        &self.stats
    }

    pub(crate) fn documents(&self) -> &AHashMap<DocId, Document> {
        &self.documents
    }

    pub(crate) fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Chaining handle for attaching typed attribute values to one document.
///
/// Borrows the engine mutably; attach calls return the handle so
/// attachments compose builder-style. A kind mismatch against an
/// attribute's locked kind is a programmer error and panics.
pub struct DocumentMut<'a> {
    engine: &'a mut Engine,
    id: DocId,
}

impl<'a> DocumentMut<'a> {
    /// Returns the handle of the document being built
    pub fn id(&self) -> DocId {
        self.id
    }

    /// Attach a 32-bit integer value
    pub fn int32_key(self, name: &str, value: i32) -> Self {
        self.key(name, Value::int32(value))
    }

    /// Attach an 8-bit integer value
    pub fn int8_key(self, name: &str, value: i8) -> Self {
        self.key(name, Value::int8(value))
    }

    /// Attach a 32-bit float value
    pub fn float32_key(self, name: &str, value: f32) -> Self {
        self.key(name, Value::float32(value))
    }

    /// Attach a text value
    pub fn string_key(self, name: &str, value: impl Into<String>) -> Self {
        self.key(name, Value::text(value))
    }

    fn key(self, name: &str, value: Value) -> Self {
        match self.engine.try_attach(self.id, name, value) {
            Ok(()) => self,
            Err(err) => panic!("attribute {name:?}: {err}"),
        }
    }
}
