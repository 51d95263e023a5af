//! # Demo Endpoints
//!
//! Routes:
//! - GET    / — Greeting
//! - GET    /error — Simulated backend failure, answered with a generic 500
//! - GET    /secret — Reports whether a secret is configured, never its value
//! - POST   /deserialize — Allow-list validation of a JSON body

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use safeweb_schema::SanitizedPayload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;
use crate::extractors::ValidatedPayload;
use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

/// Body of `GET /secret`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SecretStatus {
    pub secret_configured: bool,
}

/// Body of a successful `POST /deserialize`.
#[derive(Debug, Serialize)]
pub struct DeserializeResponse {
    pub status: &'static str,
    pub data: SanitizedPayload,
}

/// Failure of the simulated backend behind `/error`.
#[derive(Error, Debug)]
enum BackendError {
    #[error("database connection to {host} refused")]
    ConnectionRefused { host: String },
}

/// Build the demo router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/error", get(simulated_error))
        .route("/secret", get(secret))
        .route("/deserialize", post(deserialize))
}

/// GET / — Greeting.
async fn index() -> Json<Greeting> {
    Json(Greeting {
        message: "hello from safeweb".to_string(),
    })
}

fn connect_backend() -> Result<(), BackendError> {
    Err(BackendError::ConnectionRefused {
        host: "127.0.0.1:5432".to_string(),
    })
}

/// GET /error — Always fails. The cause is logged; the client sees only
/// the generic internal error body.
async fn simulated_error() -> Result<Json<Greeting>, AppError> {
    connect_backend().map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(Greeting {
        message: "backend reachable".to_string(),
    }))
}

/// GET /secret — 200 when a secret is configured, 503 otherwise.
async fn secret(State(state): State<AppState>) -> Result<Json<SecretStatus>, AppError> {
    match &state.config.secret_key {
        Some(_) => Ok(Json(SecretStatus {
            secret_configured: true,
        })),
        None => {
            tracing::warn!("APP_SECRET_KEY is not set");
            Err(AppError::ServiceUnavailable(
                "secret key not configured".to_string(),
            ))
        }
    }
}

/// POST /deserialize — Echo a body that passed payload validation.
async fn deserialize(ValidatedPayload(data): ValidatedPayload) -> Json<DeserializeResponse> {
    tracing::debug!(fields = data.len(), "payload accepted");
    Json(DeserializeResponse { status: "ok", data })
}
