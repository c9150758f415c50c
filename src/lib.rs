// Safe Bite - Pregnancy food safety checker backed by web search heuristics

pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod safety;    // Snippet classifier and result aggregation
pub mod search;    // Google Custom Search and Wikipedia clients
pub mod service;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use safety::{aggregate, classify, AggregatedVerdict, SafetyStatus, SearchCandidate};
pub use service::SafetyService;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
