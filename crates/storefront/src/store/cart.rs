//! Cart store: the four cart operations over a persistent [`Cart`].

use serde::Deserialize;
use serde_json::Value;
use storefront_core::{Cart, CartItem, NewCartItem, ProductId};

use super::PersistentStore;
use super::codec::Persisted;

/// Shared cart state.
pub type CartStore = PersistentStore<Cart>;

impl Persisted for Cart {
    type Items = Vec<CartItem>;

    const SLOT: &'static str = "cart-storage";

    fn to_payload(&self) -> Self::Items {
        self.items().to_vec()
    }

    fn from_payload(items: Self::Items) -> Self {
        Cart::from_items(items)
    }

    /// Accept the unversioned client-side format:
    /// `{"state": {"items": [...]}, "version": 0}`.
    fn migrate_unversioned(value: Value) -> Option<Self> {
        #[derive(Deserialize)]
        struct LegacyState {
            items: Vec<CartItem>,
        }

        #[derive(Deserialize)]
        struct LegacySlot {
            state: LegacyState,
        }

        let slot: LegacySlot = serde_json::from_value(value).ok()?;
        tracing::info!(
            lines = slot.state.items.len(),
            "Migrating unversioned cart slot"
        );
        Some(Cart::from_items(slot.state.items))
    }
}

impl PersistentStore<Cart> {
    /// Add one unit of a product, appending it if it is new.
    pub async fn add_item(&self, item: NewCartItem) -> Cart {
        self.apply("add_item", |cart| cart.add_item(item)).await
    }

    /// Remove a product. Absent IDs are ignored.
    pub async fn remove_item(&self, id: &ProductId) -> Cart {
        self.apply("remove_item", |cart| cart.remove_item(id)).await
    }

    /// Set a product's quantity; zero removes it. Absent IDs are ignored.
    pub async fn update_quantity(&self, id: &ProductId, quantity: u32) -> Cart {
        self.apply("update_quantity", |cart| cart.update_quantity(id, quantity))
            .await
    }

    /// Empty the cart.
    pub async fn clear_cart(&self) -> Cart {
        self.apply("clear_cart", Cart::clear).await
    }
}
