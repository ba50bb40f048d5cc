//! Client for the external product search endpoint.
//!
//! The endpoint is an opaque collaborator: `GET <url>?q=<query>` returning a
//! JSON list of `{id, name, category}` records. Successful responses are
//! cached in memory per trimmed query using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::SearchConfig;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Errors that can occur when calling the search endpoint.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Search endpoint returned HTTP {0}")]
    Status(u16),

    /// Response body was not a list of results.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Search API client. Cheap to clone.
#[derive(Clone)]
pub struct SearchClient {
    inner: Arc<SearchClientInner>,
}

struct SearchClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<String, Arc<Vec<SearchResult>>>,
}

impl SearchClient {
    /// Create a new search client.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            inner: Arc::new(SearchClientInner {
                client,
                endpoint: config.url.clone(),
                cache,
            }),
        }
    }

    /// Search the catalogue.
    ///
    /// Blank queries return no results without calling the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the request fails, the endpoint answers with a
    /// non-success status, or the body is not a list of results.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.inner.cache.get(query).await {
            tracing::debug!(hits = cached.len(), "Search cache hit");
            return Ok(cached.as_ref().clone());
        }

        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Search endpoint returned non-success status"
            );
            return Err(SearchError::Status(status.as_u16()));
        }

        let results: Vec<SearchResult> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse search response");
            e
        })?;

        self.inner
            .cache
            .insert(query.to_string(), Arc::new(results.clone()))
            .await;

        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> SearchClient {
        let url = Url::parse(&format!("{}/api/search", server.uri())).unwrap();
        SearchClient::new(&SearchConfig::new(url))
    }

    #[tokio::test]
    async fn test_search_returns_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("q", "desk lamp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "lamp-1", "name": "Desk Lamp", "category": "lighting"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let results = client_for(&server).search("  desk lamp ").await.unwrap();
        assert_eq!(
            results,
            vec![SearchResult {
                id: "lamp-1".to_string(),
                name: "Desk Lamp".to_string(),
                category: "lighting".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_blank_query_skips_request() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        assert!(client.search("").await.unwrap().is_empty());
        assert!(client.search("   ").await.unwrap().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_query_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.search("chair").await.unwrap();
        client.search("chair ").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).search("chair").await.unwrap_err();
        assert!(matches!(err, SearchError::Status(500)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": 3}"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("chair").await.unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search("chair").await.is_err());
        assert!(client.search("chair").await.is_err());
    }
}
