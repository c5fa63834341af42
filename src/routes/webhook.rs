// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for WHOOP events.

use crate::error::AppError;
use crate::models::WebhookEvent;
use crate::services::RecoveryProcessor;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", post(handle_event))
}

/// Handle an incoming webhook event (POST).
///
/// Delivery is fire-and-forget from WHOOP's side, so anything that makes the
/// event untrustworthy or unusable (bad signature, unparseable body, unknown
/// event type) is logged and dropped with a 200 - a non-2xx would only cause
/// retry storms for a payload that will never become valid. Upstream
/// failures while processing a valid event do return an error status so
/// WHOOP's redelivery applies.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    tracing::debug!(
        body = %String::from_utf8_lossy(&body),
        "Webhook request received (raw)"
    );

    // Verify the signature over timestamp || body before touching the payload
    let signature = headers
        .get("x-whoop-signature")
        .and_then(|h| h.to_str().ok());
    let timestamp = headers
        .get("x-whoop-signature-timestamp")
        .and_then(|h| h.to_str().ok());

    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        tracing::warn!("Ignoring webhook without signature headers");
        return Ok(StatusCode::OK);
    };

    if !state.signature.verify(signature, timestamp, &body) {
        tracing::warn!("Ignoring webhook with invalid signature");
        return Ok(StatusCode::OK);
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse webhook event");
            return Ok(StatusCode::OK); // Still return 200 to WHOOP to avoid retries
        }
    };

    tracing::info!(
        user_id = event.user_id,
        id = %event.id,
        event_type = %event.event_type,
        trace_id = %event.trace_id,
        "Webhook event parsed successfully"
    );

    match event.event_type.as_str() {
        "recovery.updated" => {
            let processor = RecoveryProcessor::new(state.whoop.clone(), state.notion.clone());

            // Errors propagate to the response so WHOOP redelivers the event
            match processor.process_recovery(&event.id).await? {
                Some(result) => {
                    tracing::info!(
                        id = %event.id,
                        date = %result.date,
                        updated_existing = result.updated_existing,
                        "Recovery synced"
                    );
                }
                None => {
                    tracing::info!(id = %event.id, "Recovery not yet scored, nothing synced");
                }
            }
        }
        _ => {
            tracing::debug!(
                event_type = %event.event_type,
                "Ignoring unhandled event type"
            );
        }
    }

    Ok(StatusCode::OK)
}
