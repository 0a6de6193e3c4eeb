//! Key-value persistence abstraction.
//!
//! The portal's local persistence (catalog cache, preference record,
//! one-shot prompt flags) is a flat string-keyed, string-valued store.
//! Components receive a [`KeyValueStore`] rather than reaching for an
//! ambient backend, so tests can substitute [`MemoryStore`] and observe
//! every read and write.

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

/// Errors surfaced by a store backend.
///
/// Callers in this layer treat read failures as a miss and write
/// failures as non-fatal; the variants exist so frontends can log
/// something useful.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A flat string-to-string store with no transactional guarantees.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests and for sessions where no durable backend
/// is available (the layer then simply loses state on shutdown).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("favorites").unwrap().is_none());

        store.set("favorites", r#"{"a":true}"#).unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some(r#"{"a":true}"#));

        store.set("favorites", "{}").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("{}"));

        store.remove("favorites").unwrap();
        assert!(store.get("favorites").unwrap().is_none());
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove("never-set").unwrap();
    }
}
