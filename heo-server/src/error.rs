use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heo_core::indicator::UnknownKey;
use heo_utils::error::YearRangeError;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

/// Handler failures, rendered as `{"detail": "..."}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// An upstream service failed or answered with something unusable.
    #[error("{0}")]
    BadGateway(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<YearRangeError> for ApiError {
    fn from(err: YearRangeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<UnknownKey> for ApiError {
    fn from(err: UnknownKey) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::BadGateway(detail) => {
                warn!("upstream failure: {}", detail);
                (StatusCode::BAD_GATEWAY, detail)
            }
            ApiError::Internal(err) => {
                error!("request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
