//! Place search via the Exa search API
//!
//! One POST per query, fixed result cap, no pagination. The orchestration
//! path uses [`SearchClient::search_or_empty`], which collapses every failure
//! into an empty list so a broken search provider never blocks an exchange.

use crate::http::get_search_client;
use crate::models::{MISSING_TITLE, PlaceResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Production Exa endpoint; override via [`SearchClient::new`] or EXA_BASE_URL
pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";

/// Fixed number of results requested per query
pub const RESULT_CAP: usize = 3;

/// Why a search attempt failed
///
/// Callers that want the source-compatible behavior ("no results" and
/// "search failed" look the same) use [`SearchClient::search_or_empty`];
/// this type exists so other callers can tell them apart.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search API key not configured")]
    NotConfigured,
    #[error("search API error {status}")]
    Status { status: reqwest::StatusCode },
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid search response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    num_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<SearchItem> for PlaceResult {
    fn from(item: SearchItem) -> Self {
        Self {
            title: item.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            url: item.url.unwrap_or_default(),
        }
    }
}

/// Client for the place search provider
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Search for places, surfacing the failure reason
    ///
    /// At most [`RESULT_CAP`] results are returned; items with a missing
    /// title get the `"-"` placeholder, items with a missing url an empty
    /// string.
    pub async fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> Result<Vec<PlaceResult>, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::NotConfigured);
        }

        let request = SearchRequest {
            query,
            num_results: RESULT_CAP,
        };

        let response = get_search_client()
            .post(format!("{}/search", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                status: response.status(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .results
            .into_iter()
            .take(RESULT_CAP)
            .map(PlaceResult::from)
            .collect())
    }

    /// Search for places, collapsing every failure into an empty list
    ///
    /// A missing key performs no network call. Swallowed failures are
    /// reported through `tracing` at debug level.
    pub async fn search_or_empty(&self, query: &str, api_key: &str) -> Vec<PlaceResult> {
        match self.search(query, api_key).await {
            Ok(places) => places,
            Err(SearchError::NotConfigured) => Vec::new(),
            Err(err) => {
                debug!(error = %err, "place search degraded to empty results");
                Vec::new()
            }
        }
    }
}
