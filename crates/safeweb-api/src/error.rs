//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps payload rejections and handler failures to HTTP status codes
//! with JSON error bodies. Internal error detail is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use safeweb_schema::Rejection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
///
/// All error responses use this format. `details` carries the offending
/// field for field-level payload rejections and is omitted otherwise.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "INVALID_FIELD", "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for field-level rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body failed payload validation (400).
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Request body could not be read (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit (413).
    #[error("payload too large")]
    PayloadTooLarge,

    /// No route matches the request (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// A required dependency or setting is unavailable (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                match rejection {
                    Rejection::InvalidJson => "INVALID_JSON",
                    Rejection::InvalidPayload => "INVALID_PAYLOAD",
                    Rejection::InvalidField(_) => "INVALID_FIELD",
                    Rejection::InvalidType(_) => "INVALID_TYPE",
                },
            ),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match &self {
            Self::Rejected(rejection) => rejection
                .field()
                .map(|field| serde_json::json!({ "field": field })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        // Picked up by the metrics middleware to count rejections by kind.
        if let Self::Rejected(rejection) = self {
            response.extensions_mut().insert(rejection);
        }
        response
    }
}
