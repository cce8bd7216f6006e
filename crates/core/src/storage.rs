//! Key-value storage abstraction for durable local state.
//!
//! Mirrors the browser `localStorage` contract: plain string keys mapped
//! to serialized string values, one synchronous read/write per mutation,
//! last-write-wins. Two entries are in use: the cart snapshot and the
//! age-confirmation flag.

use std::collections::HashMap;

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Serialized cart line sequence.
    pub const CART: &str = "cart";
    /// Age-confirmation flag, `"1"` when confirmed.
    pub const AGE_CONFIRMED: &str = "age18ok";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable string key to string value storage.
///
/// Reads are infallible by contract: a backend that cannot read reports
/// the entry as absent, matching `localStorage` semantics.
pub trait KeyValueStorage {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot persist the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Used in tests and wherever durability is not required.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable age-confirmation gate.
///
/// Confirmation is one-way: once stored, only clearing the backing
/// storage resets it.
#[derive(Debug)]
pub struct AgeGate<S> {
    storage: S,
}

impl<S: KeyValueStorage> AgeGate<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether the user has previously confirmed their age.
    pub fn is_confirmed(&self) -> bool {
        self.storage
            .get(keys::AGE_CONFIRMED)
            .is_some_and(|v| v == "1")
    }

    /// Record the age confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be persisted.
    pub fn confirm(&mut self) -> Result<(), StorageError> {
        self.storage.set(keys::AGE_CONFIRMED, "1")
    }

    /// Consume the gate and return the backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
