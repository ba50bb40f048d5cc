//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use storefront_core::{ProductId, Wishlist};
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistView {
    pub ids: Vec<String>,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            ids: wishlist.ids().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Response to a toggle: whether the product is now saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleResponse {
    pub id: String,
    pub saved: bool,
    pub wishlist: WishlistView,
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    Json(WishlistView::from(&state.wishlist().snapshot()))
}

/// Save the product if it is not saved, unsave it otherwise.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>, Path(id): Path<String>) -> Json<ToggleResponse> {
    let id = ProductId::new(id);
    let wishlist = state.wishlist().toggle(&id).await;
    Json(ToggleResponse {
        saved: wishlist.contains(&id),
        id: id.into_inner(),
        wishlist: WishlistView::from(&wishlist),
    })
}

/// Unsave every product.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<WishlistView> {
    Json(WishlistView::from(&state.wishlist().clear().await))
}
