//! Cart items and the cart collection.
//!
//! A [`Cart`] is an insertion-ordered list of [`CartItem`]s keyed by product
//! ID. Operations never mutate the receiver: each one returns the next cart
//! value, which the owning store then persists and publishes.
//!
//! # Invariants
//!
//! - Product IDs are unique within a cart.
//! - Every present item has `quantity >= 1`.
//! - Existing items keep their position; new items are appended.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product reference paired with a purchase quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL or path.
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Input for [`Cart::add_item`]: a cart item without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

impl NewCartItem {
    fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity,
        }
    }
}

/// The cart collection.
///
/// Deserializing goes through [`Cart::from_items`], so a cart read back from
/// storage always satisfies the invariants above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary records.
    ///
    /// Records with a zero quantity are dropped. A repeated ID is folded into
    /// its first occurrence with the quantities summed, keeping the first
    /// occurrence's name, price and image.
    #[must_use]
    pub fn from_items(records: impl IntoIterator<Item = CartItem>) -> Self {
        let mut items: Vec<CartItem> = Vec::new();
        for record in records {
            if record.quantity == 0 {
                continue;
            }
            match items.iter_mut().find(|item| item.id == record.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(record.quantity);
                }
                None => items.push(record),
            }
        }
        Self { items }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// every other field is left as it was; otherwise the item is appended
    /// with a quantity of one.
    #[must_use]
    pub fn add_item(&self, item: NewCartItem) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => items.push(item.with_quantity(1)),
        }
        Self { items }
    }

    /// Remove a product. Removing an absent ID is a no-op.
    #[must_use]
    pub fn remove_item(&self, id: &ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| &item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Set the quantity of a product.
    ///
    /// A quantity of zero removes the product. No upper bound or stock check
    /// is applied. Updating an absent ID is a no-op.
    #[must_use]
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> Self {
        if quantity == 0 {
            return self.remove_item(id);
        }

        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if &item.id == id {
                        CartItem {
                            quantity,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    /// Return an empty cart.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn clear(&self) -> Self {
        Self::new()
    }

    /// Items in cart order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up an item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of every line total.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
