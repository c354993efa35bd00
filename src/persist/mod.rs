//! Persistence Collaborator
//!
//! The games persist nothing but named scalar counters as decimal
//! strings: gold, experience, level, one key per upgrade, and in the
//! life-based variant health and shield. The `Store` trait is the whole
//! interface; any backend works, and the simulation never sees a
//! malformed value — parsing falls back to the documented defaults.

use std::collections::BTreeMap;

pub mod file;

pub use file::{FileStore, StoreError};

/// Key names for the persisted counters.
pub mod keys {
    /// Gold balance
    pub const GOLD: &str = "gold";
    /// Experience toward the next level
    pub const EXPERIENCE: &str = "experience";
    /// Player level
    pub const LEVEL: &str = "level";
    /// Player health (life-based variant only)
    pub const HEALTH: &str = "health";
    /// Player shield (life-based variant only)
    pub const SHIELD: &str = "shield";
}

/// Named scalar key/value storage.
///
/// Implementations only provide raw string get/set; the typed helpers
/// take care of defaulting. All persisted counters are non-negative, so
/// negative or non-finite stored values count as malformed too.
pub trait Store {
    /// Read the raw value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the raw value for a key.
    fn set(&mut self, key: &str, value: &str);

    /// Read an f64, falling back to `default` on a missing or malformed
    /// value.
    fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(default)
    }

    /// Read a u32, falling back to `default` on a missing or malformed
    /// value.
    fn get_u32_or(&self, key: &str, default: u32) -> u32 {
        self.get(key)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(default)
    }

    /// Write an f64 as a decimal string.
    fn set_f64(&mut self, key: &str, value: f64) {
        self.set(key, &value.to_string());
    }

    /// Write a u32 as a decimal string.
    fn set_u32(&mut self, key: &str, value: u32) {
        self.set(key, &value.to_string());
    }
}

/// In-memory store, the default for tests and throwaway sessions.
///
/// BTreeMap keeps iteration (and serialized form) deterministic.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================
