//! # Custom Extractors & Validation
//!
//! [`ValidatedPayload`] reads the raw request body and runs it through the
//! allow-list validator with the schema held in [`AppState`]. Handlers
//! receive only a [`SanitizedPayload`]; every failure becomes an
//! [`AppError`] before the handler runs.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use safeweb_schema::{validate, SanitizedPayload};

use crate::error::AppError;
use crate::state::AppState;

/// A request body that passed payload validation.
///
/// No `Content-Type` check is made: the validator decides whether the
/// bytes are JSON.
#[derive(Debug, Clone)]
pub struct ValidatedPayload(pub SanitizedPayload);

impl FromRequest<AppState> for ValidatedPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|err| {
            if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::BadRequest(err.body_text())
            }
        })?;

        match validate(&body, &state.payload_schema) {
            Ok(payload) => Ok(Self(payload)),
            Err(rejection) => {
                tracing::info!(kind = rejection.kind(), "payload rejected");
                Err(rejection.into())
            }
        }
    }
}
