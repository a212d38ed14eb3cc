//! KeyValueStore implementation
//!
//! HashMap-based store with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

/// In-memory key-value map
///
/// All methods take `&self`; the internal lock provides many concurrent
/// readers and one writer at a time. Mutations must only be made after
/// the corresponding WAL append succeeded (or by recovery replay).
pub struct KeyValueStore {
    data: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl KeyValueStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Get a value by key (read lock)
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    /// Insert or overwrite a key (write lock)
    ///
    /// Returns the previous value if the key existed.
    pub fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        self.data.write().insert(key, value)
    }

    /// Remove a key (write lock)
    ///
    /// Returns the previous value; removing an absent key is a no-op.
    pub fn delete(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.write().remove(key)
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.data.read().contains_key(key)
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for KeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}
