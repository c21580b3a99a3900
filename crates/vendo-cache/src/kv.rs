//! Key-value store with automatic serialization.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// Byte-oriented key-value backend.
///
/// Each key holds a single record; `set` replaces the whole record
/// atomically.
pub trait KeyValue: Send + Sync {
    /// Read the raw bytes stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous record.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-memory backend for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.keys().cloned().collect())
    }
}

fn poisoned() -> CacheError {
    CacheError::StoreError("store lock poisoned".to_string())
}

/// A shared backend is itself a backend.
impl<S: KeyValue + ?Sized> KeyValue for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Typed store over a raw backend with automatic JSON serialization.
///
/// # Example
///
/// ```rust
/// use vendo_cache::{MemoryStore, TypedStore};
///
/// let store = TypedStore::new(MemoryStore::new());
/// store.set("count:a", &3_u32).unwrap();
/// let n: Option<u32> = store.get("count:a").unwrap();
/// assert_eq!(n, Some(3));
/// ```
pub struct TypedStore<S> {
    backend: S,
}

impl<S: KeyValue> TypedStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get a value, deserializing from JSON.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value, serializing to JSON.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust
/// use vendo_cache::store_key;
///
/// let key = store_key!("cart", "user123");
/// assert_eq!(key, "cart:user123");
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set("a", b"hello").unwrap();

        assert_eq!(store.get("a").unwrap(), Some(b"hello".to_vec()));
        assert!(store.exists("a").unwrap());
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("a", b"one").unwrap();
        store.set("a", b"two").unwrap();

        assert_eq!(store.get("a").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.keys().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store_delete_missing_is_ok() {
        let store = MemoryStore::new();
        store.delete("nope").unwrap();
        assert!(!store.exists("nope").unwrap());
    }

    #[test]
    fn test_typed_store_roundtrip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Record {
            id: u32,
            label: String,
        }

        let store = TypedStore::new(MemoryStore::new());
        let record = Record {
            id: 7,
            label: "seven".to_string(),
        };
        store.set("record:7", &record).unwrap();

        let loaded: Option<Record> = store.get("record:7").unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn test_typed_store_corrupt_record_errors() {
        let store = TypedStore::new(MemoryStore::new());
        store.backend().set("bad", b"not json").unwrap();

        let result: Result<Option<u32>, _> = store.get("bad");
        assert!(result.is_err());
    }

    #[test]
    fn test_store_key_macro() {
        assert_eq!(store_key!("cart", "abc"), "cart:abc");
        assert_eq!(store_key!("cart", "abc", 12), "cart:abc:12");
    }
}
