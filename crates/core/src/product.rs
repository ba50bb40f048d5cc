//! Catalogue product model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::NewCartItem;
use crate::types::{ProductId, ReviewId};

/// A product as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    /// Free-form attribute table shown on the details page.
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub category: String,
    /// Units available. Informational only: the cart never checks it.
    pub stock: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// Star rating, 1-5.
    pub rating: u8,
    pub comment: String,
    pub author: String,
    pub date: String,
}

impl Product {
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Mean review rating, or `None` when there are no reviews.
    #[must_use]
    pub fn average_rating(&self) -> Option<Decimal> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: Decimal = self
            .reviews
            .iter()
            .map(|review| Decimal::from(review.rating))
            .sum();
        Some(total / Decimal::from(self.reviews.len()))
    }

    /// Image used for cart lines and thumbnails.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl From<&Product> for NewCartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_json() -> &'static str {
        r#"{
            "id": "desk-lamp",
            "name": "Desk Lamp",
            "description": "Adjustable arm",
            "price": 49.5,
            "images": ["/img/lamp-1.jpg", "/img/lamp-2.jpg"],
            "specifications": {"Wattage": "9W", "Colour": "Black"},
            "category": "lighting",
            "stock": 0,
            "reviews": [
                {"id": "r1", "rating": 5, "comment": "Great", "author": "Sam", "date": "2024-03-01"},
                {"id": "r2", "rating": 4, "comment": "Good", "author": "Kim", "date": "2024-03-09"}
            ],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z"
        }"#
    }

    #[test]
    fn test_deserialize_catalogue_shape() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.id.as_str(), "desk-lamp");
        assert_eq!(product.price, Decimal::new(495, 1));
        assert_eq!(product.specifications.get("Wattage").unwrap(), "9W");
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_reviews_are_optional() {
        let mut value: serde_json::Value = serde_json::from_str(product_json()).unwrap();
        value.as_object_mut().unwrap().remove("reviews");
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.reviews.is_empty());
        assert_eq!(product.average_rating(), None);
    }

    #[test]
    fn test_average_rating() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.average_rating(), Some(Decimal::new(45, 1)));
    }

    #[test]
    fn test_cart_item_uses_first_image() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let item = NewCartItem::from(&product);
        assert_eq!(item.id, product.id);
        assert_eq!(item.image, "/img/lamp-1.jpg");
        assert_eq!(item.price, product.price);
    }

    #[test]
    fn test_cart_item_without_images() {
        let mut product: Product = serde_json::from_str(product_json()).unwrap();
        product.images.clear();
        assert_eq!(NewCartItem::from(&product).image, "");
    }
}
