//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/search` - Safety verdict for a food
//! - `/api/wiki` - Wikipedia summary for a food
//! - `/api/lookup` - Verdict and summary in one call
//! - `/api/suggestions` - Common searches for the landing page
//! - `/api/health` - Health checks
//! - `/` - Single-page frontend

pub mod health;
pub mod search;
pub mod ui;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::{apply_cors, rate_limiter_middleware};
use crate::models::AppState;

/// Create the main application router
///
/// Lookup endpoints share one rate limit; health checks and the page itself
/// are never limited.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let api_router = Router::new()
        .merge(search::router(state.clone()))
        .layer(from_fn_with_state(state.limiter.clone(), rate_limiter_middleware));

    let router = Router::new()
        .merge(api_router)
        .merge(health::router(state.clone()))
        .merge(ui::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &state.config.server.cors_allowed_origins)
}
