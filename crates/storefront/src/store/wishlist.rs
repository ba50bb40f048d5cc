//! Wishlist store.

use storefront_core::{ProductId, Wishlist};

use super::PersistentStore;
use super::codec::Persisted;

pub type WishlistStore = PersistentStore<Wishlist>;

impl Persisted for Wishlist {
    type Items = Vec<ProductId>;

    const SLOT: &'static str = "wishlist-storage";

    fn to_payload(&self) -> Self::Items {
        self.ids().to_vec()
    }

    fn from_payload(items: Self::Items) -> Self {
        items.into()
    }
}

impl PersistentStore<Wishlist> {
    /// Save or unsave a product.
    pub async fn toggle(&self, id: &ProductId) -> Wishlist {
        self.apply("toggle", |wishlist| wishlist.toggle(id)).await
    }

    pub async fn clear(&self) -> Wishlist {
        self.apply("clear_wishlist", Wishlist::clear).await
    }
}
