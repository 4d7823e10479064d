// Shared HTTP response types for consistent API error payloads.

use axum::Json;
use axum::http::StatusCode;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}
