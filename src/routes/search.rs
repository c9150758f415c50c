use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::info;
use validator::Validate;

use crate::models::{AppState, FoodQuery, LookupResponse, SafetyReport};
use crate::search::WikiSummary;
use crate::service::SUGGESTIONS;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search_safety))
        .route("/api/wiki", get(search_wiki))
        .route("/api/lookup", get(lookup))
        .route("/api/suggestions", get(suggestions))
        .with_state(state)
}

/// Trimmed, validated `q` parameter
fn require_food(params: &FoodQuery) -> AppResult<String> {
    let food = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Missing query parameter".to_string()))?;

    params
        .validate()
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    Ok(food.to_string())
}

/// GET /api/search - safety verdict, or `null` when nothing was found
async fn search_safety(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> AppResult<Json<Option<SafetyReport>>> {
    let food = require_food(&params)?;
    info!(food = %food, "Received safety search request");

    let report = state.service.check_safety(&food).await?;
    Ok(Json(report))
}

/// GET /api/wiki - encyclopedia summary, or `null`
async fn search_wiki(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> AppResult<Json<Option<WikiSummary>>> {
    let food = require_food(&params)?;
    Ok(Json(state.service.wiki_summary(&food).await))
}

/// GET /api/lookup - both of the above in one round trip
async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> AppResult<Json<LookupResponse>> {
    let food = require_food(&params)?;
    info!(food = %food, "Received lookup request");

    let response = state.service.lookup(&food).await?;
    Ok(Json(response))
}

async fn suggestions() -> Json<&'static [&'static str]> {
    Json(SUGGESTIONS)
}
