//! Durable slots for client-side state.
//!
//! A slot is a named string value that survives restarts, the server-side
//! counterpart of a browser `localStorage` key. Storage implementations only
//! move strings; encoding and schema handling belong to the stores in
//! [`crate::store`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Slot keys become file names, so they are restricted to `[A-Za-z0-9_-]`.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),
}

/// A string key/value store holding durable slots.
pub trait SlotStorage: Send + Sync {
    /// Read a slot. Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be written.
    fn save(&self, key: &str, data: &str) -> Result<(), StorageError>;
}

/// Reject keys that are not safe to use as a file stem.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
