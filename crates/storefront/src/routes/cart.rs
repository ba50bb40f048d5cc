//! Cart route handlers.
//!
//! Every mutating handler returns the full cart view after the change, so
//! clients re-render from the response rather than patching local state.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use storefront_core::{Cart, CartItem, CurrencyCode, NewCartItem, Price, ProductId};
use tracing::instrument;

use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub line_count: usize,
    pub subtotal: String,
}

impl CartView {
    /// Render a cart with prices formatted in `currency`.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            item_count: cart.item_count(),
            line_count: cart.line_count(),
            subtotal: Price::new(cart.subtotal(), currency).display(),
        }
    }
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: Price::new(item.price, currency).display(),
            line_price: Price::new(item.line_total(), currency).display(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartCount {
    pub count: u64,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

fn view(state: &AppState, cart: &Cart) -> Json<CartView> {
    Json(CartView::new(cart, state.config().currency))
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    view(&state, &state.cart().snapshot())
}

/// Add one unit of a product.
#[instrument(skip(state, item), fields(product_id = %item.id))]
pub async fn add(State(state): State<AppState>, Json(item): Json<NewCartItem>) -> Json<CartView> {
    let cart = state.cart().add_item(item).await;
    view(&state, &cart)
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(state, body), fields(quantity = body.quantity))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let cart = state
        .cart()
        .update_quantity(&ProductId::new(id), body.quantity)
        .await;
    view(&state, &cart)
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Json<CartView> {
    let cart = state.cart().remove_item(&ProductId::new(id)).await;
    view(&state, &cart)
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().clear_cart().await;
    view(&state, &cart)
}

/// Cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().snapshot().item_count(),
    })
}
