use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] JsonRejection),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Batch contains no reviews")]
    EmptyBatch,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPayload(rejection) => rejection.status(),
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyBatch => StatusCode::BAD_REQUEST,
        };

        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
