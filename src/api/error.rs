use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

use super::models::ErrorResponse;

/// Errors crossing the HTTP boundary.
///
/// Messages are fixed and generic; upstream detail (provider status codes,
/// response bodies, ledger errors) is logged server-side at the call site
/// and never exposed to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Scraping API key is not configured on the server")]
    ApiKeyMissing,
    #[error("A valid numeric store ID is required")]
    InvalidStoreId,
    #[error("Both store and jobId are required for background jobs")]
    MissingJobParams,
    #[error("The scraping service failed to retrieve the page")]
    UpstreamFailed,
    #[error("Failed to parse any items from the page")]
    ParseFailed,
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ApiKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidStoreId => StatusCode::BAD_REQUEST,
            ApiError::MissingJobParams => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ParseFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ApiKeyMissing => "API_KEY_MISSING",
            ApiError::InvalidStoreId => "INVALID_STORE_ID",
            ApiError::MissingJobParams => "MISSING_JOB_PARAMS",
            ApiError::UpstreamFailed => "UPSTREAM_FAILED",
            ApiError::ParseFailed => "PARSE_FAILED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(json!(body))).into_response()
    }
}
