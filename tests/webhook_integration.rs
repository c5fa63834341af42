// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for webhook handling.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

const TEST_SECRET: &str = "test_client_secret"; // Matches Config::test_default()
const TIMESTAMP: &str = "1709360000000";

/// Build a signed webhook request for the given payload.
fn signed_request(body: &str) -> Request<Body> {
    let signature = common::sign(TEST_SECRET, TIMESTAMP, body.as_bytes());
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-whoop-signature", signature)
        .header("x-whoop-signature-timestamp", TIMESTAMP)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_webhook_unknown_event_type_is_noop() {
    let (app, _state) = common::create_test_app();

    let body = json!({
        "user_id": 1,
        "id": 555,
        "type": "workout.updated",
        "trace_id": "t-workout"
    })
    .to_string();

    let response = app.oneshot(signed_request(&body)).await.unwrap();

    // Dropped without touching any upstream; the offline state would have
    // errored if the pipeline had run.
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_invalid_signature_dropped() {
    let (app, _state) = common::create_test_app();

    let body = json!({
        "user_id": 1,
        "id": 555,
        "type": "recovery.updated",
        "trace_id": "t-1"
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .header("x-whoop-signature", "bm90LXRoZS1yZWFsLXNpZ25hdHVyZQ==")
                .header("x-whoop-signature-timestamp", TIMESTAMP)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    // Authentication failure is not an error: the event is silently dropped.
    // A recovery.updated event that passed verification would have hit the
    // offline store and returned 500, so 200 proves nothing ran.
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_missing_signature_headers_dropped() {
    let (app, _state) = common::create_test_app();

    let body = json!({
        "user_id": 1,
        "id": 555,
        "type": "recovery.updated",
        "trace_id": "t-1"
    })
    .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_malformed_body_dropped() {
    let (app, _state) = common::create_test_app();

    // Correctly signed, but not a webhook event
    let response = app
        .oneshot(signed_request(r#"{"unexpected": "shape"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_recovery_updated_dispatches_pipeline() {
    let (app, _state) = common::create_test_app();

    let body = json!({
        "user_id": 1,
        "id": 555,
        "type": "recovery.updated",
        "trace_id": "t-1"
    })
    .to_string();

    let response = app.oneshot(signed_request(&body)).await.unwrap();

    // The pipeline ran and hit the offline credential store, and that error
    // propagates to the response (so WHOOP redelivers).
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
