// Process-wide request rate limiting with governor

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use crate::config::RateLimitConfig;

/// Shared limiter; `None` inside means unlimited
#[derive(Clone, Default)]
pub struct RequestLimiter {
    inner: Option<Arc<DefaultDirectRateLimiter>>,
}

impl RequestLimiter {
    pub fn per_minute(requests: u32) -> Self {
        let inner = NonZeroU32::new(requests)
            .map(|limit| Arc::new(RateLimiter::direct(Quota::per_minute(limit))));
        Self { inner }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::per_minute(config.requests_per_minute)
    }

    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn allow(&self) -> bool {
        match &self.inner {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}

pub async fn rate_limiter_middleware(
    State(limiter): State<RequestLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if !limiter.allow() {
        warn!(path = %req.uri().path(), "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "error": "Too many requests" })),
        )
            .into_response();
    }

    next.run(req).await
}
