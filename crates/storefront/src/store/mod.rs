//! Persistent state stores.
//!
//! A [`PersistentStore`] owns one state value. It is created explicitly and
//! handed to the HTTP layer through [`AppState`](crate::state::AppState);
//! nothing here is global.
//!
//! # Lifecycle
//!
//! - The slot is read once at [`PersistentStore::open`], during startup. A
//!   missing slot, or one that fails to decode, starts the store empty.
//! - Each mutation computes the next value from the current one under the
//!   channel's write lock and publishes it to [`snapshot`] readers and every
//!   [`subscribe`]r. The slot is then written on the blocking pool, outside
//!   that lock, before the mutation returns.
//! - Mutations are serialised by an async mutex, so slot writes land in the
//!   order their states were published.
//! - A mutation that leaves the value unchanged (removing an absent ID, say)
//!   is neither published nor written. Observers only see real changes.
//!
//! Slot write failures are logged and do not fail the mutation. The slot is
//! last-write-wins if several processes share it.
//!
//! [`snapshot`]: PersistentStore::snapshot
//! [`subscribe`]: PersistentStore::subscribe

pub mod cart;
pub mod codec;
pub mod wishlist;

pub use cart::CartStore;
pub use codec::{DecodeError, Persisted, SCHEMA_VERSION};
pub use wishlist::WishlistStore;

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::storage::{MemoryStorage, SlotStorage};

/// State container backed by a durable slot.
pub struct PersistentStore<T> {
    state: watch::Sender<T>,
    storage: Arc<dyn SlotStorage>,
    writer: Mutex<()>,
}

impl<T: Persisted> PersistentStore<T> {
    /// Open a store on the state type's slot, reading its current contents.
    ///
    /// Reads the slot synchronously; call it while starting up, not from a
    /// request handler.
    #[must_use]
    pub fn open(storage: Arc<dyn SlotStorage>) -> Self {
        let initial = load_initial::<T>(storage.as_ref(), T::SLOT);
        Self {
            state: watch::Sender::new(initial),
            storage,
            writer: Mutex::new(()),
        }
    }

    /// A store whose slot lives in process memory and is lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()))
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }

    /// Receive every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// Replace the state with `f(current)`, write it to the slot and return it.
    ///
    /// The new value is visible to readers before the slot write finishes.
    /// A result equal to the current state is neither published nor written,
    /// so a mutation that changes nothing (removing an absent ID) is not a
    /// full-state replacement and subscribers are not woken.
    pub(crate) async fn apply(&self, op: &'static str, f: impl FnOnce(&T) -> T) -> T {
        let _writer = self.writer.lock().await;

        let mut next = T::default();
        let changed = self.state.send_if_modified(|current| {
            let updated = f(current);
            if updated == *current {
                next = updated;
                return false;
            }
            *current = updated.clone();
            next = updated;
            true
        });

        if changed {
            self.persist(&next).await;
        }

        tracing::debug!(op, slot = T::SLOT, changed, "Store mutation applied");
        next
    }

    async fn persist(&self, value: &T) {
        let raw = match codec::encode(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(slot = T::SLOT, error = %e, "Failed to encode store state");
                return;
            }
        };

        let storage = Arc::clone(&self.storage);
        let written = tokio::task::spawn_blocking(move || storage.save(T::SLOT, &raw)).await;

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(slot = T::SLOT, error = %e, "Failed to persist store state");
            }
            Err(e) => {
                tracing::warn!(slot = T::SLOT, error = %e, "Slot write task failed");
            }
        }
    }
}

fn load_initial<T: Persisted>(storage: &dyn SlotStorage, key: &str) -> T {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "Failed to read slot, starting empty");
            return T::default();
        }
    };

    match codec::decode::<T>(&raw) {
        Ok(state) => {
            tracing::debug!(slot = key, "Restored state from slot");
            state
        }
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "Discarding unreadable slot, starting empty");
            T::default()
        }
    }
}
