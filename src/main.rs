// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whoop-Journal API Server
//!
//! Syncs WHOOP recovery and sleep metrics into a Notion daily tracking
//! database, driven by WHOOP webhooks, and keeps the shared WHOOP OAuth
//! credential rotated on a schedule.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whoop_journal::{
    config::Config,
    db::CredentialDb,
    services::{CredentialManager, NotionClient, SignatureVerifier, WhoopClient, WhoopService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Whoop-Journal API");

    // Initialize Firestore-backed credential store
    let db = CredentialDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize WHOOP client and credential manager
    let whoop_client = WhoopClient::new(
        config.whoop_client_id.clone(),
        config.whoop_client_secret.clone(),
    );
    let credentials = CredentialManager::new(
        db,
        whoop_client.clone(),
        config.whoop_secret_id.clone(),
    );
    let whoop = WhoopService::new(whoop_client, credentials.clone());
    tracing::info!(secret_id = %config.whoop_secret_id, "Credential manager initialized");

    // Initialize Notion client
    let notion = NotionClient::new(
        config.notion_token.clone(),
        config.notion_database_id.clone(),
    );
    tracing::info!(database_id = %config.notion_database_id, "Notion client initialized");

    // Webhook signature verifier (keyed by the OAuth client secret)
    let signature = SignatureVerifier::new(config.whoop_client_secret.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        credentials,
        whoop,
        notion,
        signature,
    });

    // Build router
    let app = whoop_journal::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("whoop_journal=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
