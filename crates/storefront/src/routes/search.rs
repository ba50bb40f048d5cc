//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::search::SearchResult;
use crate::state::AppState;

/// Longest query forwarded to the search endpoint, in characters.
const MAX_QUERY_CHARS: usize = 200;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Proxy a query to the configured search endpoint.
///
/// Blank queries return an empty list.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>> {
    let query_str = query.q.trim();
    if query_str.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::BadRequest(format!(
            "query must be at most {MAX_QUERY_CHARS} characters"
        )));
    }

    let client = state.search().ok_or(AppError::SearchUnavailable)?;
    let results = client.search(query_str).await?;
    Ok(Json(results))
}
