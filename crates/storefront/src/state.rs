//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::search::SearchClient;
use crate::storage::{FileStorage, SlotStorage};
use crate::store::{CartStore, WishlistStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the stores the HTTP
/// layer mutates. Handlers receive it through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: CartStore,
    wishlist: WishlistStore,
    search: Option<SearchClient>,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Opens the cart and wishlist stores on `config.data_dir` when
    /// persistence is enabled, in memory otherwise.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let (cart, wishlist) = if config.persist {
            tracing::info!(dir = %config.data_dir.display(), "Persisting stores to disk");
            let storage: Arc<dyn SlotStorage> = Arc::new(FileStorage::new(&config.data_dir));
            (
                CartStore::open(Arc::clone(&storage)),
                WishlistStore::open(storage),
            )
        } else {
            tracing::info!("Persistence disabled, stores are in memory");
            (CartStore::in_memory(), WishlistStore::in_memory())
        };
        let search = config.search.as_ref().map(SearchClient::new);

        Self::from_parts(config, cart, wishlist, search)
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        cart: CartStore,
        wishlist: WishlistStore,
        search: Option<SearchClient>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                wishlist,
                search,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Search client, if a search endpoint is configured.
    #[must_use]
    pub fn search(&self) -> Option<&SearchClient> {
        self.inner.search.as_ref()
    }
}
