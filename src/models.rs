use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::config::Config;
use crate::middleware::RequestLimiter;
use crate::safety::{AggregatedVerdict, SafetyStatus};
use crate::search::WikiSummary;
use crate::service::SafetyService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<SafetyService>,
    pub limiter: RequestLimiter,
}

impl AppState {
    pub fn new(config: Config, service: SafetyService) -> Self {
        let limiter = RequestLimiter::from_config(&config.rate_limit);
        Self {
            config,
            service: Arc::new(service),
            limiter,
        }
    }
}

/// Safety verdict as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub status: SafetyStatus,
    pub summary: String,
    pub snippet: String,
    pub source: String,
    pub link: String,
}

impl From<&AggregatedVerdict> for SafetyReport {
    fn from(verdict: &AggregatedVerdict) -> Self {
        Self {
            status: verdict.status,
            summary: verdict.summary(),
            snippet: verdict.snippet().to_string(),
            source: verdict.source().to_string(),
            link: verdict.link().to_string(),
        }
    }
}

/// `?q=` parameter shared by the lookup endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodQuery {
    #[validate(length(max = 100, message = "Query must be at most 100 characters"))]
    pub q: Option<String>,
}

/// Combined answer for one food: verdict plus encyclopedia summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub query: String,
    pub safety: Option<SafetyReport>,
    pub wiki: Option<WikiSummary>,
    pub fallback_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub search_configured: bool,
}
