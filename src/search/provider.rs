use async_trait::async_trait;

use super::{SearchError, WikiSummary};
use crate::safety::SearchCandidate;

/// Web search backend returning ranked hits for a query
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, SearchError>;
}

/// Encyclopedia backend returning a short article summary, if any
#[async_trait]
pub trait EncyclopediaProvider: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Option<WikiSummary>, SearchError>;
}
