// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WHOOP API client for recovery and sleep data.
//!
//! Handles:
//! - Recovery fetching per cycle for the sync pipeline
//! - Sleep session fetching
//! - Refresh-token rotation against the OAuth token endpoint

use crate::error::AppError;
use crate::models::EventId;
use serde::Deserialize;

/// Scopes requested when rotating the refresh token, matching the scopes of
/// the original authorization grant.
const OAUTH_SCOPES: &str =
    "offline read:recovery read:cycles read:sleep read:workout read:profile read:body_measurement";

/// WHOOP API client.
#[derive(Clone)]
pub struct WhoopClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl WhoopClient {
    /// Create a new WHOOP client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.prod.whoop.com/developer".to_string(),
            token_url: "https://api.prod.whoop.com/oauth/oauth2/token".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Create a client pointed at custom endpoints (used by tests to target
    /// a local mock server).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        base_url: String,
        token_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token_url,
            client_id,
            client_secret,
        }
    }

    /// Get the recovery record for a physiological cycle.
    pub async fn get_recovery(
        &self,
        access_token: &str,
        cycle_id: &EventId,
    ) -> Result<WhoopRecovery, AppError> {
        let url = format!("{}/v1/cycle/{}/recovery", self.base_url, cycle_id);
        self.get_json(&url, access_token).await
    }

    /// Get a sleep session by ID.
    pub async fn get_sleep(
        &self,
        access_token: &str,
        sleep_id: &EventId,
    ) -> Result<WhoopSleep, AppError> {
        let url = format!("{}/v1/activity/sleep/{}", self.base_url, sleep_id);
        self.get_json(&url, access_token).await
    }

    /// Redeem a refresh token for a new access/refresh pair.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", OAUTH_SCOPES),
            ])
            .send()
            .await
            .map_err(|e| AppError::WhoopApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::WhoopApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Token rejected - surfaces as a fatal error; the scheduled
            // rotation is what recovers from expiry, not this call path.
            if status.as_u16() == 401 {
                tracing::warn!("WHOOP rejected access token (401)");
            }

            return Err(AppError::WhoopApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WhoopApi(format!("JSON parse error: {}", e)))
    }
}

/// Token refresh response from the WHOOP OAuth endpoint.
///
/// Both fields are required; a response missing either token fails
/// deserialization and therefore never reaches the credential store.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Processing status of a recovery score.
///
/// Scoring is asynchronous upstream; only `SCORED` recoveries carry
/// finalized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreState {
    Scored,
    PendingScore,
    Unscorable,
    /// Unrecognized state from a newer API version
    #[serde(other)]
    Unknown,
}

/// Recovery record for a cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoopRecovery {
    /// Whether the score below is finalized
    pub score_state: ScoreState,
    /// Sleep session this recovery was derived from
    pub sleep_id: EventId,
    /// Score details, present once scored
    pub score: Option<WhoopRecoveryScore>,
}

/// Recovery score details.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoopRecoveryScore {
    /// Recovery score as a percentage (0-100)
    pub recovery_score: f64,
}

/// Sleep session response.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoopSleep {
    /// End time of sleep (ISO 8601)
    pub end: String,
    /// Sleep score details, present once scored
    pub score: Option<WhoopSleepScore>,
}

/// Sleep score details.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoopSleepScore {
    /// Sleep performance percentage (0-100)
    pub sleep_performance_percentage: f64,
    /// Stage summary breakdown
    pub stage_summary: WhoopStageSummary,
}

/// Sleep stage summary.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoopStageSummary {
    /// Total time in bed in milliseconds
    pub total_in_bed_time_milli: i64,
    /// Total awake time in milliseconds
    pub total_awake_time_milli: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// WhoopService - High-level service that resolves the shared credential
// ─────────────────────────────────────────────────────────────────────────────

use crate::services::credentials::CredentialManager;

/// High-level WHOOP service that looks up the shared credential per call.
///
/// The credential is re-read from the store on every call rather than cached,
/// so a rotation that lands between two calls is picked up without a restart.
#[derive(Clone)]
pub struct WhoopService {
    client: WhoopClient,
    credentials: CredentialManager,
}

impl WhoopService {
    pub fn new(client: WhoopClient, credentials: CredentialManager) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Get the recovery record for a cycle.
    pub async fn get_recovery(&self, cycle_id: &EventId) -> Result<WhoopRecovery, AppError> {
        let credential = self.credentials.current().await?;
        self.client
            .get_recovery(&credential.access_token, cycle_id)
            .await
    }

    /// Get a sleep session by ID.
    pub async fn get_sleep(&self, sleep_id: &EventId) -> Result<WhoopSleep, AppError> {
        let credential = self.credentials.current().await?;
        self.client
            .get_sleep(&credential.access_token, sleep_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_state_parsing() {
        assert_eq!(
            serde_json::from_str::<ScoreState>(r#""SCORED""#).unwrap(),
            ScoreState::Scored
        );
        assert_eq!(
            serde_json::from_str::<ScoreState>(r#""PENDING_SCORE""#).unwrap(),
            ScoreState::PendingScore
        );
        assert_eq!(
            serde_json::from_str::<ScoreState>(r#""UNSCORABLE""#).unwrap(),
            ScoreState::Unscorable
        );
        // Future states must not break deserialization
        assert_eq!(
            serde_json::from_str::<ScoreState>(r#""SOMETHING_NEW""#).unwrap(),
            ScoreState::Unknown
        );
    }

    #[test]
    fn test_recovery_parsing() {
        let recovery: WhoopRecovery = serde_json::from_str(
            r#"{"cycle_id": 93845, "sleep_id": "slp-9", "user_id": 10129,
                "score_state": "SCORED", "score": {"recovery_score": 65,
                "resting_heart_rate": 58}}"#,
        )
        .unwrap();

        assert_eq!(recovery.score_state, ScoreState::Scored);
        assert_eq!(recovery.sleep_id.to_string(), "slp-9");
        assert_eq!(recovery.score.unwrap().recovery_score, 65.0);
    }

    #[test]
    fn test_pending_recovery_has_no_score() {
        let recovery: WhoopRecovery = serde_json::from_str(
            r#"{"sleep_id": 12, "score_state": "PENDING_SCORE"}"#,
        )
        .unwrap();

        assert_eq!(recovery.score_state, ScoreState::PendingScore);
        assert!(recovery.score.is_none());
    }
}
