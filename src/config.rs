//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and injected into the services through
//! their constructors; no component touches ambient env state after that.

use std::env;

/// Firestore document id the WHOOP credential pair is stored under when no
/// `WHOOP_SECRET_ID` is configured.
const DEFAULT_SECRET_ID: &str = "whoop-oauth";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// WHOOP OAuth client ID (public)
    pub whoop_client_id: String,
    /// Firestore document id for the stored WHOOP credential pair
    pub whoop_secret_id: String,
    /// Notion database id of the daily tracking database
    pub notion_database_id: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// WHOOP OAuth client secret (also the webhook signing key)
    pub whoop_client_secret: String,
    /// Notion integration token
    pub notion_token: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In production the secrets arrive as env vars via Cloud Run secret
    /// bindings; locally a `.env` file works the same way.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            whoop_client_id: env::var("WHOOP_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("WHOOP_CLIENT_ID"))?,
            whoop_secret_id: env::var("WHOOP_SECRET_ID")
                .unwrap_or_else(|_| DEFAULT_SECRET_ID.to_string()),
            notion_database_id: env::var("DAILY_TRACKING_DB")
                .map_err(|_| ConfigError::Missing("DAILY_TRACKING_DB"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            whoop_client_secret: env::var("WHOOP_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WHOOP_CLIENT_SECRET"))?,
            notion_token: env::var("NOTION_INTEGRATION_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("NOTION_INTEGRATION_TOKEN"))?,
        })
    }

    /// Fixed config for tests only.
    pub fn test_default() -> Self {
        Self {
            whoop_client_id: "test_client_id".to_string(),
            whoop_secret_id: "test-whoop-oauth".to_string(),
            notion_database_id: "test-tracking-db".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            whoop_client_secret: "test_client_secret".to_string(),
            notion_token: "test_notion_token".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
