//! Persisted currency preference.
//!
//! One key in a user-scoped key-value store. Storage failures are logged and
//! otherwise ignored: an unreadable store behaves like an empty one.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use pricewise_shared::Currency;

use super::error::StoreError;

/// Key the preferred currency is stored under.
pub const PREFERENCE_KEY: &str = "preferredCurrency";

/// User-scoped persistent key-value store.
pub trait PreferenceStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Reads the stored preference, treating storage errors as "no preference".
pub fn load_preference(store: &dyn PreferenceStore) -> Option<String> {
    match store.get(PREFERENCE_KEY) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(err) => {
            warn!(error = %err, "Could not read currency preference");
            None
        }
    }
}

/// Persists `currency` as the preference, logging storage errors.
pub fn save_preference(store: &dyn PreferenceStore, currency: Currency) {
    if let Err(err) = store.set(PREFERENCE_KEY, currency.code()) {
        warn!(error = %err, currency = %currency, "Could not persist currency preference");
    }
}

/// In-process store, for tests and environments without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Creates a store holding `value` under the preference key.
    #[must_use]
    pub fn with_preference(value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(PREFERENCE_KEY.to_string(), value.into());
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
