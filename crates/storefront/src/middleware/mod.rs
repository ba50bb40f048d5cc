//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id` field)
//! 3. Request ID (reuse or generate `x-request-id`)

pub mod request_id;

use axum::body::Body;
use axum::http::Request;
use tower_http::trace::{HttpMakeClassifier, TraceLayer};
use tracing::Span;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

type MakeRequestSpan = fn(&Request<Body>) -> Span;

/// Request tracing layer whose span carries an empty `request_id` field for
/// [`request_id_middleware`] to fill in.
#[must_use]
pub fn trace_layer() -> TraceLayer<HttpMakeClassifier, MakeRequestSpan> {
    TraceLayer::new_for_http().make_span_with(make_request_span as MakeRequestSpan)
}

fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
