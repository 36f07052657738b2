use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ValidationError;

/// Errors surfaced over HTTP.
///
/// Validation rejections become 400s; everything else is a 500 whose
/// message has already been shaped by the handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(message) => {
                tracing::warn!(message = %message, "rejecting invalid request");
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(message) => {
                tracing::error!(message = %message, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
