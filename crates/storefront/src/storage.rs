//! File-backed key-value storage.
//!
//! The durable counterpart of the in-memory backend: a single JSON
//! object on disk, one synchronous read/write per mutation,
//! last-write-wins. Concurrent writers are not coordinated and may
//! overwrite each other, matching browser local-storage semantics
//! across tabs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use kiosk_core::storage::{KeyValueStorage, StorageError};

/// Key-value storage persisted as one JSON object file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backend over `path`.
    ///
    /// The file is created on first write; a missing file reads as empty.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        std::fs::write(&self.path, raw).map_err(|e| StorageError::Backend(e.to_string()))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kiosk_core::cart::CartStore;
    use kiosk_core::product::Product;
    use kiosk_core::storage::keys;
    use rust_decimal::Decimal;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("kiosk-storage-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {id}"),
            brand: String::new(),
            flavor: String::new(),
            category: "pods".to_string(),
            strength: None,
            volume_ml: None,
            price: Decimal::from(100),
            old_price: None,
            is_new: false,
            popular: false,
            img: String::new(),
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let storage = JsonFileStorage::new(temp_file("missing.json"));
        assert!(storage.get(keys::CART).is_none());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut storage = JsonFileStorage::new(temp_file("roundtrip.json"));
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));

        // a fresh handle over the same file sees the value
        let reopened = JsonFileStorage::new(storage.path.clone());
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_cart_survives_reload_through_file() {
        let path = temp_file("cart.json");

        let mut store = CartStore::hydrate(JsonFileStorage::new(path.clone()));
        store.add(&product("a")).unwrap();
        store.add(&product("a")).unwrap();
        let before = store.cart().clone();

        let reloaded = CartStore::hydrate(JsonFileStorage::new(path));
        assert_eq!(reloaded.cart(), &before);
    }
}
