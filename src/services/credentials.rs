// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credential lifecycle for the single WHOOP integration.
//!
//! There is exactly one credential pair, stored in Firestore under a
//! configured secret id. Webhook processing reads it; a scheduled task
//! rotates it. Rotation is schedule-driven, not a reaction to 401s from the
//! API, so the schedule must outpace token expiry.

use crate::db::CredentialDb;
use crate::error::AppError;
use crate::models::StoredCredential;
use crate::services::whoop::WhoopClient;

/// Owns reads and writes of the stored WHOOP credential.
#[derive(Clone)]
pub struct CredentialManager {
    db: CredentialDb,
    client: WhoopClient,
    secret_id: String,
}

impl CredentialManager {
    pub fn new(db: CredentialDb, client: WhoopClient, secret_id: String) -> Self {
        Self {
            db,
            client,
            secret_id,
        }
    }

    /// Read the stored credential pair.
    pub async fn current(&self) -> Result<StoredCredential, AppError> {
        self.db
            .get_credential(&self.secret_id)
            .await?
            .ok_or_else(|| {
                AppError::CredentialUnavailable(format!(
                    "no credential stored under '{}'",
                    self.secret_id
                ))
            })
    }

    /// Redeem the stored refresh token for a new pair and replace the stored
    /// document.
    ///
    /// The write only happens after a successful token response that carries
    /// both tokens, so any failure leaves the stored pair untouched. Two
    /// rotations racing each other redeem the same refresh token twice; the
    /// provider invalidates it on first use, so the loser fails here and
    /// never writes, leaving the winner's pair in place.
    pub async fn rotate(&self) -> Result<(), AppError> {
        let current = self.current().await?;

        let refreshed = self.client.refresh_token(&current.refresh_token).await?;

        let replacement = StoredCredential {
            access_token: refreshed.access_token,
            refresh_token: refreshed.refresh_token,
        };
        self.db
            .set_credential(&self.secret_id, &replacement)
            .await?;

        tracing::info!(secret_id = %self.secret_id, "WHOOP credential rotated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with_memory_db() -> (CredentialManager, CredentialDb) {
        let db = CredentialDb::new_memory();
        let client = WhoopClient::new("id".to_string(), "secret".to_string());
        let manager = CredentialManager::new(db.clone(), client, "test-secret".to_string());
        (manager, db)
    }

    #[tokio::test]
    async fn test_current_fails_when_missing() {
        let (manager, _db) = manager_with_memory_db();

        let err = manager.current().await.unwrap_err();
        assert!(matches!(err, AppError::CredentialUnavailable(_)));
    }

    #[tokio::test]
    async fn test_current_returns_stored_pair() {
        let (manager, db) = manager_with_memory_db();
        let credential = StoredCredential {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
        };
        db.set_credential("test-secret", &credential).await.unwrap();

        assert_eq!(manager.current().await.unwrap(), credential);
    }
}
