//! Storage port — the raw key/value medium behind the persistent store.

use helpline_domain::error::HelplineError;

/// String key/value medium that survives process restarts.
///
/// Values are opaque strings; typing and defaults live in
/// [`PersistentStore`](crate::store::PersistentStore).
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::Storage`] when the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, HelplineError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::Storage`] when the medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), HelplineError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::Storage`] when the medium cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), HelplineError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, HelplineError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HelplineError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), HelplineError> {
        (**self).remove_item(key)
    }
}
