//! Search Module
//!
//! Clients for the two external lookups behind every query:
//! - Google Custom Search - web snippets fed to the safety heuristics
//! - Wikipedia - a general summary shown next to the verdict
//!
//! Both sit behind traits in [`provider`] so the service layer can be tested
//! without network access.

pub mod google;
pub mod provider;
pub mod wikipedia;

pub use google::GoogleSearchClient;
pub use provider::{EncyclopediaProvider, SearchProvider};
pub use wikipedia::{WikiSummary, WikiThumbnail, WikipediaClient};

use reqwest::{Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key or engine ID not configured")]
    NoApiKey,

    #[error("Search quota exceeded")]
    QuotaExceeded,

    #[error("Search endpoint not found; check the API endpoint and engine ID")]
    NotFound,

    #[error("Search API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// Shared HTTP client for the search backends
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("safe-bite/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SearchError::RequestFailed(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success response onto a [`SearchError`]
pub(crate) async fn ensure_success(response: Response) -> Result<Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(status = %status, url = %response.url().path(), "Search backend returned an error");

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(SearchError::QuotaExceeded),
        StatusCode::NOT_FOUND => Err(SearchError::NotFound),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(SearchError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }
}
