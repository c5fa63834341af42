// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task handler routes for scheduled triggers.
//!
//! These endpoints are called by Cloud Scheduler, not directly by users.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::Arc;

/// Task handler routes (called by Cloud Scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/rotate-credential", post(rotate_credential))
}

/// Rotate the stored WHOOP credential (called on a fixed schedule).
///
/// Rotation runs independently of webhook traffic; a failure here leaves the
/// stored pair untouched and in-flight webhook processing unaffected.
async fn rotate_credential(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    // Security Check: Cloud Scheduler sets this header on its requests.
    let is_scheduler = headers
        .get("x-cloudscheduler")
        .and_then(|h| h.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false);

    if !is_scheduler {
        tracing::warn!("Security Alert: Blocked rotate-credential request without scheduler header");
        return Ok(StatusCode::FORBIDDEN);
    }

    tracing::info!("Rotating WHOOP credential from scheduled trigger");
    state.credentials.rotate().await?;

    Ok(StatusCode::OK)
}
