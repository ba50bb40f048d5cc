//! In-process slots, used when persistence is disabled and in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{SlotStorage, StorageError, validate_key};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots().get(key).cloned())
    }

    fn save(&self, key: &str, data: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots().insert(key.to_string(), data.to_string());
        Ok(())
    }
}
