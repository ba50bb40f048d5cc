//! Storefront Core - Shared types library.
//!
//! This crate provides the state types used by the `storefront` service:
//! the cart, the wishlist and the product catalogue model.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. Every cart and wishlist operation takes the current
//! value and returns the next one; persistence and change notification
//! live in the `storefront` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`cart`] - Cart items and the cart collection
//! - [`wishlist`] - Saved product IDs
//! - [`product`] - Catalogue product model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartItem, NewCartItem};
pub use product::{Product, Review};
pub use types::*;
pub use wishlist::Wishlist;
