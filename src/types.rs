// Crate-wide error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Search provider error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::NoApiKey => {
                AppError::Configuration("Server configuration error: Missing API keys".to_string())
            }
            SearchError::Upstream { status, body } => AppError::Upstream {
                status,
                message: body,
            },
            SearchError::QuotaExceeded => AppError::Upstream {
                status: 429,
                message: "Search quota exceeded".to_string(),
            },
            SearchError::NotFound => AppError::Upstream {
                status: 404,
                message: "Search endpoint or engine not found".to_string(),
            },
            SearchError::RequestFailed(message) => AppError::Upstream {
                status: 502,
                message,
            },
            SearchError::ParseError(message) => AppError::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::InvalidRequest(message) | AppError::Configuration(message) => message.clone(),
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
