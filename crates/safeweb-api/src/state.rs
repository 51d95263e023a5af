//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Read-only after startup; cloning is an
//! `Arc` bump.

use std::sync::Arc;

use safeweb_schema::{FieldType, Schema};

use crate::config::AppConfig;

/// Allow-list for `POST /deserialize` bodies: `{name: text, count: integer}`.
pub fn deserialize_schema() -> Schema {
    Schema::new()
        .with_field("name", FieldType::Text)
        .with_field("count", FieldType::Integer)
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<AppConfig>,
    /// Schema applied to `/deserialize` bodies.
    pub payload_schema: Arc<Schema>,
}

impl AppState {
    /// State with default configuration (no secret, metrics on).
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with an explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            payload_schema: Arc::new(deserialize_schema()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
