//! Attribute name interning
//!
//! Each distinct attribute name is assigned a stable small integer key,
//! once, for the engine's lifetime. Keys are append-only and never reused;
//! all runtime index and statistics lookups use the key, never the name.

use ahash::AHashMap;
use serde::Serialize;

/// Stable small integer key, 1:1 with an attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttributeKey(u32);

impl AttributeKey {
    pub(crate) fn new(raw: u32) -> Self {
        AttributeKey(raw)
    }

    /// Returns the raw key value
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the key as a dense table index
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only name-to-key registry.
///
/// Counter advance and registration happen inside a single `&mut self`
/// call, so a key can never be handed out without its name being
/// registered (the two can never diverge).
#[derive(Debug, Default)]
pub struct KeyInterner {
    keys: AHashMap<String, AttributeKey>,
}

impl KeyInterner {
    /// Creates an empty interner
    pub fn new() -> Self {
        Self {
            keys: AHashMap::new(),
        }
    }

    /// Returns the key for `name`, creating it on first use.
    ///
    /// The second element is `true` when the key was created by this call.
    pub fn intern(&mut self, name: &str) -> (AttributeKey, bool) {
        if let Some(&key) = self.keys.get(name) {
            return (key, false);
        }
        let key = AttributeKey::new(self.keys.len() as u32);
        self.keys.insert(name.to_string(), key);
        (key, true)
    }

    /// Returns the key for `name` if it was ever interned. Never creates.
    pub fn lookup(&self, name: &str) -> Option<AttributeKey> {
        self.keys.get(name).copied()
    }

    /// Returns the number of interned names
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no name was ever interned
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
