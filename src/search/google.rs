//! Google Custom Search Client
//!
//! Calls the Custom Search JSON API (`/customsearch/v1`) with an API key and
//! a programmable search engine ID. Only `title`, `snippet` and `link` of each
//! item are kept.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ensure_success, SearchError, SearchProvider};
use crate::config::SearchConfig;
use crate::safety::SearchCandidate;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<SearchCandidate>,
}

pub struct GoogleSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    pub fn new(client: Client, api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    /// Build from config; `None` unless both the key and engine ID are set
    pub fn from_config(config: &SearchConfig, client: Client) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        let api_key = config.google_api_key.clone()?;
        let engine_id = config.search_engine_id.clone()?;
        Some(Self::new(client, api_key, engine_id).with_base_url(config.base_url.clone()))
    }

    /// Point the client at a different host (used by tests and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/customsearch/v1", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, SearchError> {
        info!(query = %query, "Searching Google Custom Search");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let response = ensure_success(response).await?;

        let body: CustomSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!(count = body.items.len(), "Google search completed");
        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> GoogleSearchClient {
        GoogleSearchClient::new(Client::new(), "test-key", "test-cx").with_base_url(server.url())
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let mut config = crate::config::Config::default().search;
        assert!(GoogleSearchClient::from_config(&config, Client::new()).is_none());

        config.google_api_key = Some("key".to_string());
        config.search_engine_id = Some("cx".to_string());
        let client = GoogleSearchClient::from_config(&config, Client::new()).unwrap();
        assert_eq!(client.endpoint(), "https://www.googleapis.com/customsearch/v1");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GoogleSearchClient::new(Client::new(), "k", "cx").with_base_url("http://localhost:9999/");
        assert_eq!(client.endpoint(), "http://localhost:9999/customsearch/v1");
    }

    #[tokio::test]
    async fn test_search_parses_items() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("cx".into(), "test-cx".into()),
                Matcher::UrlEncoded("q".into(), "can I eat sushi while pregnant".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"title": "Sushi and Pregnancy", "snippet": "Avoid raw fish.", "link": "https://a.example", "displayLink": "a.example"},
                    {"title": "No snippet here", "link": "https://b.example"}
                ]}"#,
            )
            .create_async()
            .await;

        let items = client_for(&server)
            .search("can I eat sushi while pregnant")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Sushi and Pregnancy");
        assert_eq!(items[0].snippet, "Avoid raw fish.");
        assert_eq!(items[1].snippet, "");
    }

    #[tokio::test]
    async fn test_missing_items_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"kind": "customsearch#search"}"#)
            .create_async()
            .await;

        let items = client_for(&server).search("anything").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::UrlEncoded("q".into(), "quota".into()))
            .with_status(429)
            .create_async()
            .await;
        server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::UrlEncoded("q".into(), "missing".into()))
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::UrlEncoded("q".into(), "broken".into()))
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(matches!(client.search("quota").await, Err(SearchError::QuotaExceeded)));
        assert!(matches!(client.search("missing").await, Err(SearchError::NotFound)));
        match client.search("broken").await {
            Err(SearchError::Upstream { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = client_for(&server).search("anything").await;
        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }
}
