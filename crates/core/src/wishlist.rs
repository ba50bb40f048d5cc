//! Saved products.
//!
//! The wishlist is an insertion-ordered set of product IDs toggled from
//! product cards. Like [`Cart`](crate::Cart), every operation returns the
//! next value.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// An ordered set of saved product IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add the product if it is not saved, remove it if it is.
    #[must_use]
    pub fn toggle(&self, id: &ProductId) -> Self {
        if self.contains(id) {
            Self {
                ids: self.ids.iter().filter(|saved| *saved != id).cloned().collect(),
            }
        } else {
            let mut ids = self.ids.clone();
            ids.push(id.clone());
            Self { ids }
        }
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn clear(&self) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Saved IDs in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<ProductId>> for Wishlist {
    fn from(ids: Vec<ProductId>) -> Self {
        let mut unique: Vec<ProductId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self { ids: unique }
    }
}

impl From<Wishlist> for Vec<ProductId> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.ids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let id = ProductId::new("lamp");
        let saved = Wishlist::new().toggle(&id);
        assert!(saved.contains(&id));
        assert_eq!(saved.len(), 1);

        let unsaved = saved.toggle(&id);
        assert!(unsaved.is_empty());
        assert_eq!(unsaved, Wishlist::new());
    }

    #[test]
    fn test_toggle_keeps_order() {
        let wishlist = Wishlist::new()
            .toggle(&ProductId::new("a"))
            .toggle(&ProductId::new("b"))
            .toggle(&ProductId::new("c"))
            .toggle(&ProductId::new("b"));
        let ids: Vec<&str> = wishlist.ids().iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let wishlist: Wishlist = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(wishlist.len(), 2);
    }
}
