//! Persistent store — typed JSON values over a [`KeyValueStore`] medium.
//!
//! Reads never fail: a missing key, an unreadable medium or a malformed
//! value all yield the caller's default. Writes never fail either; errors
//! are logged and the in-memory state stays authoritative for the session.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use helpline_domain::error::HelplineError;

use crate::ports::KeyValueStore;

/// Keys under which the ledger persists its state.
pub mod keys {
    pub const CALL_HISTORY: &str = "callHistory";
    pub const FAVORITES: &str = "favorites";
    pub const FAVORITE_COUNT: &str = "heartCount";
    pub const COPY_COUNT: &str = "copyCount";
    pub const CREDIT: &str = "coinCount";
}

/// Typed, self-healing access to a key/value medium.
pub struct PersistentStore<S> {
    medium: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    /// Borrow the underlying medium.
    pub fn medium(&self) -> &S {
        &self.medium
    }

    /// Read `key`, falling back to `default` when absent or unusable.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_or_else(key, || default)
    }

    /// Read `key`, falling back to `default()` when absent or unusable.
    pub fn get_or_else<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.medium.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%err, key, "stored value is malformed, using default");
                    default()
                }
            },
            Ok(None) => default(),
            Err(err) => {
                tracing::warn!(%err, key, "storage unavailable, using default");
                default()
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%err, key, "failed to serialize value, not persisted");
                return;
            }
        };
        if let Err(err) = self.medium.set_item(key, &raw) {
            tracing::warn!(%err, key, "failed to persist value");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.medium.remove_item(key) {
            tracing::warn!(%err, key, "failed to remove value");
        }
    }
}

/// Process-local medium; state is lost on exit.
///
/// Useful for tests and for running without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate raw values, e.g. to simulate a previous session.
    #[must_use]
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: Mutex::new(items),
        }
    }

    /// Raw value currently stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HelplineError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HelplineError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), HelplineError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_domain::favorite::{FavoriteEntry, Favorites};

    struct BrokenMedium;

    impl KeyValueStore for BrokenMedium {
        fn get_item(&self, _key: &str) -> Result<Option<String>, HelplineError> {
            Err(HelplineError::Storage("disk gone".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), HelplineError> {
            Err(HelplineError::Storage("disk gone".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), HelplineError> {
            Err(HelplineError::Storage("disk gone".into()))
        }
    }

    #[test]
    fn should_return_default_when_key_missing() {
        let store = PersistentStore::new(MemoryStore::new());
        assert_eq!(store.get_or(keys::COPY_COUNT, 2_u32), 2);
    }

    #[test]
    fn should_read_back_last_write() {
        let store = PersistentStore::new(MemoryStore::new());
        store.set(keys::CREDIT, &40_u32);
        assert_eq!(store.get_or(keys::CREDIT, 100_u32), 40);
        assert_eq!(store.medium().raw(keys::CREDIT).as_deref(), Some("40"));
    }

    #[test]
    fn should_keep_zero_instead_of_default() {
        let store = PersistentStore::new(MemoryStore::with_items([(keys::CREDIT, "0")]));
        assert_eq!(store.get_or(keys::CREDIT, 100_u32), 0);
    }

    #[test]
    fn should_return_default_when_value_is_malformed() {
        let store = PersistentStore::new(MemoryStore::with_items([
            (keys::FAVORITES, "{not json"),
            (keys::CREDIT, "-5"),
        ]));
        let favorites: Favorites = store.get_or_else(keys::FAVORITES, Favorites::new);
        assert!(favorites.is_empty());
        assert_eq!(store.get_or(keys::CREDIT, 100_u32), 100);
    }

    #[test]
    fn should_return_default_when_medium_is_unavailable() {
        let store = PersistentStore::new(BrokenMedium);
        assert_eq!(store.get_or(keys::CREDIT, 100_u32), 100);
        store.set(keys::CREDIT, &80_u32);
        store.remove(keys::CALL_HISTORY);
    }

    #[test]
    fn should_remove_key() {
        let store = PersistentStore::new(MemoryStore::new());
        let favorites: Favorites = [FavoriteEntry::new("Fire", "911")].into_iter().collect();
        store.set(keys::FAVORITES, &favorites);
        store.remove(keys::FAVORITES);
        assert!(store.medium().raw(keys::FAVORITES).is_none());
    }
}
