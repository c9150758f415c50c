//! Wikipedia Client
//!
//! Two MediaWiki API calls per lookup:
//! 1. `list=search` to find the best matching page ID
//! 2. `prop=extracts|pageimages` for the intro text and a thumbnail

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::{ensure_success, EncyclopediaProvider, SearchError};
use crate::config::WikipediaConfig;

const PAGE_URL_BASE: &str = "https://en.wikipedia.org/?curid=";

/// Thumbnail image attached to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiThumbnail {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Introductory summary of a Wikipedia article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiSummary {
    pub title: String,
    pub extract: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<WikiThumbnail>,
    pub page_id: u64,
}

impl WikiSummary {
    pub fn page_url(&self) -> String {
        format!("{}{}", PAGE_URL_BASE, self.page_id)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    pageid: u64,
}

#[derive(Deserialize)]
struct PagesResponse {
    query: PagesQuery,
}

#[derive(Deserialize)]
struct PagesQuery {
    pages: HashMap<String, Page>,
}

#[derive(Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: String,
    thumbnail: Option<WikiThumbnail>,
}

pub struct WikipediaClient {
    client: Client,
    api_url: String,
    thumbnail_size: u32,
}

impl WikipediaClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            thumbnail_size: 300,
        }
    }

    pub fn from_config(config: &WikipediaConfig, client: Client) -> Self {
        Self::new(client, config.api_url.clone()).with_thumbnail_size(config.thumbnail_size)
    }

    pub fn with_thumbnail_size(mut self, size: u32) -> Self {
        self.thumbnail_size = size;
        self
    }

    async fn best_match(&self, query: &str) -> Result<Option<u64>, SearchError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let body: SearchResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        Ok(body
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.pageid))
    }

    async fn page_summary(&self, page_id: u64) -> Result<WikiSummary, SearchError> {
        let page_id_param = page_id.to_string();
        let thumbnail_size = self.thumbnail_size.to_string();

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|pageimages"),
                ("exintro", ""),
                ("explaintext", ""),
                ("pithumbsize", thumbnail_size.as_str()),
                ("pageids", page_id_param.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let mut body: PagesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        let page = body
            .query
            .pages
            .remove(&page_id_param)
            .ok_or_else(|| SearchError::ParseError(format!("Page {} missing from response", page_id)))?;

        Ok(WikiSummary {
            title: page.title,
            extract: page.extract,
            thumbnail: page.thumbnail,
            page_id,
        })
    }
}

#[async_trait]
impl EncyclopediaProvider for WikipediaClient {
    async fn lookup(&self, query: &str) -> Result<Option<WikiSummary>, SearchError> {
        info!(query = %query, "Searching Wikipedia");

        let Some(page_id) = self.best_match(query).await? else {
            debug!(query = %query, "No Wikipedia match");
            return Ok(None);
        };

        let summary = self.page_summary(page_id).await?;
        debug!(page_id, title = %summary.title, "Wikipedia summary fetched");
        Ok(Some(summary))
    }
}
