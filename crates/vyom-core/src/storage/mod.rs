//! Durable key-value storage adapters.
//!
//! [`DurableStorage`] is the seam between the in-memory stores and whatever
//! survives a reload (browser local storage in production). Every method is
//! fallible: storage can be disabled, full, or corrupt, and callers are
//! expected to degrade rather than crash.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::{DisabledStorage, MemoryStorage};

use crate::errors::StorageError;

/// A string-keyed, string-valued persistent store.
pub trait DurableStorage {
    /// Read the value under `key`. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: DurableStorage + ?Sized> DurableStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
