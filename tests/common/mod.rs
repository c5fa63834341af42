// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use whoop_journal::config::Config;
use whoop_journal::db::CredentialDb;
use whoop_journal::routes::create_router;
use whoop_journal::services::{
    CredentialManager, NotionClient, SignatureVerifier, WhoopClient, WhoopService,
};
use whoop_journal::AppState;

/// Compute the webhook signature the way WHOOP does: base64 of
/// HMAC-SHA256(secret, timestamp || body).
#[allow(dead_code)]
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC key of any length");
    mac.update(timestamp.as_bytes());
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Build shared state with the WHOOP and Notion clients pointed at the given
/// base URLs (local fake servers in tests) and the given credential store.
#[allow(dead_code)]
pub fn state_with_endpoints(
    whoop_base: &str,
    notion_base: &str,
    db: CredentialDb,
) -> Arc<AppState> {
    let config = Config::test_default();

    let client = WhoopClient::with_base_urls(
        config.whoop_client_id.clone(),
        config.whoop_client_secret.clone(),
        whoop_base.to_string(),
        format!("{}/oauth/oauth2/token", whoop_base),
    );
    let credentials = CredentialManager::new(db, client.clone(), config.whoop_secret_id.clone());
    let whoop = WhoopService::new(client, credentials.clone());
    let notion = NotionClient::with_base_url(
        config.notion_token.clone(),
        config.notion_database_id.clone(),
        notion_base.to_string(),
    );
    let signature = SignatureVerifier::new(config.whoop_client_secret.clone());

    Arc::new(AppState {
        config,
        credentials,
        whoop,
        notion,
        signature,
    })
}

/// Create a test app with offline mock dependencies (no GCP, no network).
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    // Unroutable endpoints: any attempt to call out fails fast.
    let state = state_with_endpoints(
        "http://127.0.0.1:9",
        "http://127.0.0.1:9",
        CredentialDb::new_mock(),
    );
    (create_router(state.clone()), state)
}

/// Serve a fake upstream on an ephemeral local port, returning its base URL.
#[allow(dead_code)]
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake");
    });

    format!("http://{}", addr)
}
