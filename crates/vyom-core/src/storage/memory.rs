//! In-process storage backends.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::DurableStorage;
use crate::errors::StorageError;

/// Shared in-memory map.
///
/// Clones share the same map, the way every tab of one origin shares a
/// single local storage area.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _ = self
            .entries
            .lock()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _ = self.entries.lock().remove(key);
        Ok(())
    }
}

/// Storage that refuses every operation (private browsing, storage blocked
/// by policy, quota of zero).
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledStorage;

impl DisabledStorage {
    fn unavailable() -> StorageError {
        StorageError::Unavailable("storage is disabled".to_string())
    }
}

impl DurableStorage for DisabledStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(Self::unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(Self::unavailable())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("auth_token").unwrap().is_none());

        storage.set("auth_token", "abc").unwrap();
        assert_eq!(storage.get("auth_token").unwrap().as_deref(), Some("abc"));

        storage.remove("auth_token").unwrap();
        assert!(storage.get("auth_token").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn clones_share_entries() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();
        tab_a.set("k", "v").unwrap();
        assert_eq!(tab_b.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        assert!(MemoryStorage::new().remove("nope").is_ok());
    }

    #[test]
    fn disabled_storage_fails_everything() {
        let storage = DisabledStorage;
        assert_matches!(storage.get("k"), Err(StorageError::Unavailable(_)));
        assert_matches!(storage.set("k", "v"), Err(StorageError::Unavailable(_)));
        assert_matches!(storage.remove("k"), Err(StorageError::Unavailable(_)));
    }
}
