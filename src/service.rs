//! Safety Service
//!
//! Everything that happens around the heuristics for one user query:
//!
//! ```text
//! "sushi" ──► "can I eat sushi while pregnant" ──► SearchProvider
//!                                                      │
//!        aggregate(hits, "sushi") ◄────────────────────┘
//!                 │
//!                 ▼
//!           SafetyReport  ──┐
//!                           ├──► LookupResponse
//! "sushi" ──► Wikipedia  ───┘     (fetched concurrently)
//! ```
//!
//! Provider quota (429) and misconfiguration (404) responses become
//! `unknown` reports pointing the user at a plain Google search.

use reqwest::Url;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{LookupResponse, SafetyReport};
use crate::safety::{aggregate, SafetyStatus};
use crate::search::{
    build_http_client, EncyclopediaProvider, GoogleSearchClient, SearchError, SearchProvider,
    WikiSummary, WikipediaClient,
};
use crate::types::{AppError, AppResult};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// Foods offered as one-click searches on the landing page
pub const SUGGESTIONS: &[&str] = &["Sushi", "Coffee", "Soft Cheese", "Salmon", "Honey"];

/// Query actually sent to the search provider
pub fn search_query(food: &str) -> String {
    format!("can I eat {} while pregnant", food)
}

/// Direct Google search link offered when no verdict can be produced
pub fn google_fallback_link(food: &str) -> String {
    let query = format!("can pregnant women eat {}", food);
    match Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => GOOGLE_SEARCH_URL.to_string(),
    }
}

fn system_report(food: &str, summary: &str, snippet: &str) -> SafetyReport {
    SafetyReport {
        status: SafetyStatus::Unknown,
        summary: summary.to_string(),
        snippet: snippet.to_string(),
        source: "System".to_string(),
        link: google_fallback_link(food),
    }
}

pub struct SafetyService {
    search: Option<Arc<dyn SearchProvider>>,
    encyclopedia: Arc<dyn EncyclopediaProvider>,
}

impl SafetyService {
    pub fn new(
        search: Option<Arc<dyn SearchProvider>>,
        encyclopedia: Arc<dyn EncyclopediaProvider>,
    ) -> Self {
        Self {
            search,
            encyclopedia,
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = build_http_client(config.search.timeout_secs)?;

        let search = GoogleSearchClient::from_config(&config.search, client.clone())
            .map(|client| Arc::new(client) as Arc<dyn SearchProvider>);
        if search.is_none() {
            warn!("Google API key or search engine ID is missing; safety checks are disabled");
        }

        let encyclopedia = Arc::new(WikipediaClient::from_config(&config.wikipedia, client));

        Ok(Self::new(search, encyclopedia))
    }

    pub fn search_configured(&self) -> bool {
        self.search.is_some()
    }

    /// Search verdict for a food. `Ok(None)` when the provider found nothing.
    pub async fn check_safety(&self, food: &str) -> AppResult<Option<SafetyReport>> {
        let food = food.trim();
        if food.is_empty() {
            return Err(AppError::InvalidRequest("Missing query parameter".to_string()));
        }

        let provider = self.search.as_ref().ok_or(SearchError::NoApiKey)?;

        let candidates = match provider.search(&search_query(food)).await {
            Ok(candidates) => candidates,
            Err(SearchError::QuotaExceeded) => {
                warn!(food = %food, "Google search quota exceeded");
                return Ok(Some(system_report(
                    food,
                    "Daily search quota exceeded. Please try again tomorrow or use the direct Google link.",
                    "The free search limit for this app has been reached for today.",
                )));
            }
            Err(SearchError::NotFound) => {
                error!("Google search returned 404; check the API endpoint and search engine ID");
                return Ok(Some(system_report(
                    food,
                    "Search Configuration Error. Please verify API Key and Search Engine ID.",
                    "The application is unable to connect to Google Search. Please check the server logs for details.",
                )));
            }
            Err(e) => return Err(e.into()),
        };

        // Rules compare against what the user typed, not the expanded query
        let report = aggregate(&candidates, food).map(|verdict| SafetyReport::from(&verdict));

        match &report {
            Some(report) => info!(food = %food, status = %report.status, "Safety check completed"),
            None => info!(food = %food, "Search returned no results"),
        }

        Ok(report)
    }

    /// Encyclopedia summary. Failures are logged and treated as "no summary".
    pub async fn wiki_summary(&self, food: &str) -> Option<WikiSummary> {
        match self.encyclopedia.lookup(food.trim()).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Wikipedia lookup failed");
                None
            }
        }
    }

    /// Verdict and summary fetched concurrently
    pub async fn lookup(&self, food: &str) -> AppResult<LookupResponse> {
        let food = food.trim();
        if food.is_empty() {
            return Err(AppError::InvalidRequest("Missing query parameter".to_string()));
        }

        let (safety, wiki) = tokio::join!(self.check_safety(food), self.wiki_summary(food));

        let safety = safety.unwrap_or_else(|e| {
            warn!(error = %e, "Safety check failed during lookup");
            None
        });

        Ok(LookupResponse {
            query: food.to_string(),
            safety,
            wiki,
            fallback_link: google_fallback_link(food),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_search_query_expansion() {
        assert_eq!(search_query("soft cheese"), "can I eat soft cheese while pregnant");
    }

    #[test]
    fn test_google_fallback_link_encodes_food() {
        assert_eq!(
            google_fallback_link("soft cheese & ham"),
            "https://www.google.com/search?q=can+pregnant+women+eat+soft+cheese+%26+ham"
        );
    }

    #[tokio::test]
    async fn test_check_safety_uses_expanded_query_and_raw_food() {
        let search = Arc::new(StubSearch::new(StubOutcome::Hits(sushi_hits())));
        let service = SafetyService::new(
            Some(search.clone() as Arc<dyn SearchProvider>),
            Arc::new(StubWiki(None)),
        );

        let report = service.check_safety("  sushi ").await.unwrap().unwrap();

        assert_eq!(
            *search.queries.lock().unwrap(),
            vec!["can I eat sushi while pregnant".to_string()]
        );
        // "raw" appears in the snippet but not in the food the user typed
        assert_eq!(report.status, SafetyStatus::Caution);
        assert_eq!(report.source, "Sushi and Pregnancy");
        assert_eq!(report.link, "https://health.example/sushi");
        assert_eq!(report.summary, "Based on search results, this appears to be caution.");
    }

    #[tokio::test]
    async fn test_check_safety_no_results() {
        let service = service(Some(StubSearch::new(StubOutcome::Hits(vec![]))), StubWiki(None));
        assert_eq!(service.check_safety("sushi").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_exceeded_report() {
        let service = service(Some(StubSearch::new(StubOutcome::Quota)), StubWiki(None));
        let report = service.check_safety("brie").await.unwrap().unwrap();
        assert_eq!(report.status, SafetyStatus::Unknown);
        assert_eq!(report.source, "System");
        assert!(report.summary.starts_with("Daily search quota exceeded."));
        assert_eq!(report.link, "https://www.google.com/search?q=can+pregnant+women+eat+brie");
    }

    #[tokio::test]
    async fn test_not_found_report() {
        let service = service(Some(StubSearch::new(StubOutcome::NotFound)), StubWiki(None));
        let report = service.check_safety("brie").await.unwrap().unwrap();
        assert_eq!(report.status, SafetyStatus::Unknown);
        assert!(report.summary.starts_with("Search Configuration Error."));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let service = service(Some(StubSearch::new(StubOutcome::Upstream(500))), StubWiki(None));
        let error = service.check_safety("brie").await.unwrap_err();
        assert!(matches!(error, AppError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_missing_provider_is_configuration_error() {
        let service = service(None, StubWiki(None));
        assert!(!service.search_configured());
        let error = service.check_safety("brie").await.unwrap_err();
        assert!(matches!(error, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let service = service(Some(StubSearch::new(StubOutcome::Hits(sushi_hits()))), StubWiki(None));
        assert!(matches!(
            service.check_safety("   ").await,
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(service.lookup("").await, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_lookup_combines_both_sources() {
        let service = service(
            Some(StubSearch::new(StubOutcome::Hits(sushi_hits()))),
            StubWiki(Some(sushi_wiki())),
        );

        let response = assert_ok!(service.lookup("sushi").await);
        assert_eq!(response.query, "sushi");
        assert_eq!(response.safety.unwrap().status, SafetyStatus::Caution);
        assert_eq!(response.wiki.unwrap().page_id, 28456);
        assert_eq!(
            response.fallback_link,
            "https://www.google.com/search?q=can+pregnant+women+eat+sushi"
        );
    }

    #[tokio::test]
    async fn test_lookup_degrades_when_sources_fail() {
        let service = service(Some(StubSearch::new(StubOutcome::Upstream(500))), FailingWiki);
        let response = assert_ok!(service.lookup("sushi").await);
        assert!(response.safety.is_none());
        assert!(response.wiki.is_none());
    }
}
