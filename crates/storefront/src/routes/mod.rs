//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Health check
//!
//! # Cart
//! GET    /api/cart                 - Cart view
//! DELETE /api/cart                 - Clear cart
//! POST   /api/cart/items           - Add one unit of a product
//! PATCH  /api/cart/items/{id}      - Set quantity (0 removes)
//! DELETE /api/cart/items/{id}      - Remove line
//! GET    /api/cart/count           - Cart count badge
//!
//! # Wishlist
//! GET    /api/wishlist             - Saved product ids
//! DELETE /api/wishlist             - Clear wishlist
//! POST   /api/wishlist/{id}/toggle - Save or unsave a product
//!
//! # Search
//! GET    /api/search?q=            - Proxy to the search endpoint
//! ```

pub mod cart;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    http::Uri,
    middleware::from_fn,
    routing::{get, patch, post},
};

use crate::error::AppError;
use crate::middleware::{request_id_middleware, trace_layer};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/{id}/toggle", post(wishlist::toggle))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/search", get(search::search))
}

/// Build the full application: health check, API routes, request tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .fallback(not_found)
        .with_state(state)
        .layer(from_fn(request_id_middleware))
        .layer(trace_layer())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{SearchConfig, StorefrontConfig};
    use crate::search::SearchClient;
    use crate::storage::{MemoryStorage, SlotStorage};
    use crate::store::{CartStore, WishlistStore};

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            persist: false,
            ..StorefrontConfig::default()
        }
    }

    fn test_app() -> Router {
        app(AppState::new(test_config()))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_req(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn mug() -> Value {
        json!({"id": "mug", "name": "Mug", "price": "12.50", "image": "/mug.jpg"})
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&test_app(), get_req("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = send(&test_app(), get_req("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cart_starts_empty() {
        let response = send(&test_app(), get_req("/api/cart")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["item_count"], 0);
        assert_eq!(body["subtotal"], "$0.00");
    }

    #[tokio::test]
    async fn test_add_twice_increments_quantity() {
        let app = test_app();
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;
        let response = send(&app, json_req("POST", "/api/cart/items", &mug())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["quantity"], 2);
        assert_eq!(body["items"][0]["line_price"], "$25.00");
        assert_eq!(body["subtotal"], "$25.00");
    }

    #[tokio::test]
    async fn test_add_rejects_malformed_body() {
        let response = send(
            &test_app(),
            json_req("POST", "/api/cart/items", &json!({"id": "mug"})),
        )
        .await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_update_quantity_and_zero_removes() {
        let app = test_app();
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;

        let response = send(
            &app,
            json_req("PATCH", "/api/cart/items/mug", &json!({"quantity": 5})),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["items"][0]["quantity"], 5);
        assert_eq!(body["item_count"], 5);

        let response = send(
            &app,
            json_req("PATCH", "/api/cart/items/mug", &json!({"quantity": 0})),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let app = test_app();
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;
        send(
            &app,
            json_req(
                "POST",
                "/api/cart/items",
                &json!({"id": "tee", "name": "Tee", "price": 20, "image": ""}),
            ),
        )
        .await;

        let body = json_body(send(&app, empty_req("DELETE", "/api/cart/items/mug")).await).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["id"], "tee");

        let body = json_body(send(&app, empty_req("DELETE", "/api/cart")).await).await;
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["item_count"], 0);
    }

    #[tokio::test]
    async fn test_remove_missing_item_is_noop() {
        let app = test_app();
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;

        let response = send(&app, empty_req("DELETE", "/api/cart/items/unknown")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["item_count"], 1);
    }

    #[tokio::test]
    async fn test_count() {
        let app = test_app();
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;
        send(&app, json_req("POST", "/api/cart/items", &mug())).await;

        let body = json_body(send(&app, get_req("/api/cart/count")).await).await;
        assert_eq!(body, json!({"count": 2}));
    }

    #[tokio::test]
    async fn test_wishlist_toggle() {
        let app = test_app();

        let body = json_body(send(&app, empty_req("POST", "/api/wishlist/mug/toggle")).await).await;
        assert_eq!(body["saved"], true);
        assert_eq!(body["wishlist"]["ids"], json!(["mug"]));

        let body = json_body(send(&app, empty_req("POST", "/api/wishlist/mug/toggle")).await).await;
        assert_eq!(body["saved"], false);

        let body = json_body(send(&app, get_req("/api/wishlist")).await).await;
        assert_eq!(body["ids"], json!([]));
    }

    #[tokio::test]
    async fn test_wishlist_clear() {
        let app = test_app();
        send(&app, empty_req("POST", "/api/wishlist/mug/toggle")).await;
        send(&app, empty_req("POST", "/api/wishlist/tee/toggle")).await;

        let response = send(&app, empty_req("DELETE", "/api/wishlist")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["ids"], json!([]));

        let body = json_body(send(&app, get_req("/api/wishlist")).await).await;
        assert_eq!(body["ids"], json!([]));
    }

    #[tokio::test]
    async fn test_search_unconfigured_is_unavailable() {
        let response = send(&test_app(), get_req("/api/search?q=mug")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_search_rejects_long_query() {
        let uri = format!("/api/search?q={}", "a".repeat(201));
        let response = send(&test_app(), get_req(&uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn app_with_search(endpoint: &str) -> Router {
        let config = test_config();
        let storage: Arc<dyn SlotStorage> = Arc::new(MemoryStorage::new());
        let search = SearchClient::new(&SearchConfig::new(Url::parse(endpoint).unwrap()));
        app(AppState::from_parts(
            config,
            CartStore::open(Arc::clone(&storage)),
            WishlistStore::open(storage),
            Some(search),
        ))
    }

    #[tokio::test]
    async fn test_search_proxies_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "mug"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "mug", "name": "Mug", "category": "kitchen"}
            ])))
            .mount(&server)
            .await;

        let app = app_with_search(&format!("{}/search", server.uri()));
        let response = send(&app, get_req("/api/search?q=mug")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["id"], "mug");
        assert_eq!(body[0]["category"], "kitchen");
    }

    #[tokio::test]
    async fn test_search_blank_query_returns_empty() {
        let server = MockServer::start().await;
        let app = app_with_search(&format!("{}/search", server.uri()));

        let response = send(&app, get_req("/api/search?q=%20%20")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app_with_search(&format!("{}/search", server.uri()));
        let response = send(&app, get_req("/api/search?q=mug")).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
