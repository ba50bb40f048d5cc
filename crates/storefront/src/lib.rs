//! Storefront service library.
//!
//! Owns the cart and wishlist stores, their persistence, the search proxy and
//! the HTTP routes over them. The binary in `main.rs` wires these to Sentry
//! and a TCP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
pub mod store;
