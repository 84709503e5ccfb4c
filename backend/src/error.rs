use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::FormErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database query error: {0}")]
    Query(#[from] diesel::result::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid membership request")]
    Validation(FormErrors),
    #[error("Too many requests for this phone number, please try again later")]
    RateLimited,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid membership request", "fields": fields})),
            )
                .into_response(),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"error": self.to_string()})),
            )
                .into_response(),
            ApiError::Storage(_) | ApiError::Internal(_) => {
                tracing::error!("Contact request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Could not save your request, please try again"})),
                )
                    .into_response()
            }
        }
    }
}
