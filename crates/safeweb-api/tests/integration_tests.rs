//! # Integration Tests for safeweb-api
//!
//! Drives the assembled router in-process: demo endpoints, payload
//! rejections over HTTP, secret handling, error hygiene, health probes,
//! and the metrics endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use safeweb_api::config::{AppConfig, SecretKey};
use safeweb_api::error::ErrorBody;
use safeweb_api::{AppState, MAX_BODY_BYTES};

const SECRET: &str = "HARDCODED_SECRET_123";

/// Helper: build the test app with default configuration (no secret).
fn test_app() -> axum::Router {
    safeweb_api::app(AppState::new())
}

/// Helper: build the test app with a configured secret.
fn test_app_with_secret() -> axum::Router {
    let config = AppConfig {
        secret_key: Some(SecretKey::new(SECRET)),
        ..AppConfig::default()
    };
    safeweb_api::app(AppState::with_config(config))
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> axum::http::Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_deserialize(app: axum::Router, body: impl Into<Body>) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/deserialize")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn error_body(response: axum::http::Response<Body>) -> ErrorBody {
    serde_json::from_str(&body_string(response).await).unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = get(test_app(), "/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = get(test_app(), "/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Index --------------------------------------------------------------------

#[tokio::test]
async fn test_index_greets() {
    let response = get(test_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"message": "hello from safeweb"}));
}

#[tokio::test]
async fn test_unknown_route_is_structured_404() {
    let response = get(test_app(), "/admin").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "NOT_FOUND");
}

// -- Error hygiene ------------------------------------------------------------

#[tokio::test]
async fn test_error_endpoint_hides_cause() {
    let response = get(test_app(), "/error").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = body_string(response).await;
    assert!(!text.contains("127.0.0.1"), "leaked: {text}");
    assert!(!text.contains("database"), "leaked: {text}");
    let body: ErrorBody = serde_json::from_str(&text).unwrap();
    assert_eq!(body.error.code, "INTERNAL_ERROR");
    assert_eq!(body.error.message, "An internal error occurred");
}

// -- Secret -------------------------------------------------------------------

#[tokio::test]
async fn test_secret_never_echoed() {
    let response = get(test_app_with_secret(), "/secret").await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(!text.contains(SECRET), "secret leaked: {text}");
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body, json!({"secret_configured": true}));
}

#[tokio::test]
async fn test_secret_missing_returns_503() {
    let response = get(test_app(), "/secret").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "SERVICE_UNAVAILABLE");
}

// -- Deserialize --------------------------------------------------------------

#[tokio::test]
async fn test_deserialize_empty_object() {
    let response = post_deserialize(test_app(), "{}").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"status": "ok", "data": {}}));
}

#[tokio::test]
async fn test_deserialize_valid_payload() {
    let response = post_deserialize(test_app(), r#"{"name": "a", "count": 3}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({"status": "ok", "data": {"name": "a", "count": 3}})
    );
}

#[tokio::test]
async fn test_deserialize_unknown_field() {
    let response = post_deserialize(test_app(), r#"{"name": "a", "extra": 1}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "INVALID_FIELD");
    assert_eq!(body.error.message, "invalid_field:extra");
    assert_eq!(body.error.details, Some(json!({"field": "extra"})));
}

#[tokio::test]
async fn test_deserialize_wrong_type() {
    let response = post_deserialize(test_app(), r#"{"count": "three"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "INVALID_TYPE");
    assert_eq!(body.error.message, "invalid_type:count");
}

#[tokio::test]
async fn test_deserialize_boolean_count_rejected() {
    let response = post_deserialize(test_app(), r#"{"count": true}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await.error.message, "invalid_type:count");
}

#[tokio::test]
async fn test_deserialize_array_is_invalid_payload() {
    let response = post_deserialize(test_app(), "[1,2,3]").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "INVALID_PAYLOAD");
    assert_eq!(body.error.message, "invalid_payload");
    assert!(body.error.details.is_none());
}

#[tokio::test]
async fn test_deserialize_malformed_bytes() {
    let response = post_deserialize(test_app(), b"\x80\x04\x95not json".to_vec()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body.error.code, "INVALID_JSON");
    assert_eq!(body.error.message, "invalid_json");
}

#[tokio::test]
async fn test_deserialize_without_content_type() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/deserialize")
                .body(Body::from(r#"{"name": "x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deserialize_oversized_body() {
    let big = format!(r#"{{"name": "{}"}}"#, "a".repeat(MAX_BODY_BYTES + 1));
    let response = post_deserialize(test_app(), big).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_body(response).await.error.code, "PAYLOAD_TOO_LARGE");
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_rejections() {
    let app = test_app();
    let response = post_deserialize(app.clone(), r#"{"bogus": 1}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.contains("safeweb_payload_rejections_total{kind=\"invalid_field\"} 1"), "{text}");
    assert!(text.contains("path=\"/deserialize\""), "{text}");
}

#[tokio::test]
async fn test_metrics_disabled() {
    let config = AppConfig {
        metrics_enabled: false,
        ..AppConfig::default()
    };
    let app = safeweb_api::app(AppState::with_config(config));
    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
