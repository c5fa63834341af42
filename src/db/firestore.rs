// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed credential operations.
//!
//! Holds exactly one kind of document: the singleton WHOOP OAuth credential
//! pair, stored in the `credentials` collection under the configured secret
//! id. Each write replaces the whole document, which is what keeps the
//! access/refresh pair consistent for readers.

use crate::db::collections;
use crate::error::AppError;
use crate::models::StoredCredential;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Firestore-backed credential store.
#[derive(Clone)]
pub struct CredentialDb {
    inner: DbInner,
}

#[derive(Clone)]
enum DbInner {
    Firestore(firestore::FirestoreDb),
    /// In-memory store for tests that need to observe writes.
    Memory(Arc<RwLock<Option<StoredCredential>>>),
    /// Offline mode; every operation errors.
    Offline,
}

impl CredentialDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            inner: DbInner::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing a
        // custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            inner: DbInner::Firestore(client),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            inner: DbInner::Offline,
        }
    }

    /// Create an in-memory store for tests that exercise the credential
    /// read/rotate lifecycle without a Firestore emulator.
    pub fn new_memory() -> Self {
        Self {
            inner: DbInner::Memory(Arc::new(RwLock::new(None))),
        }
    }

    /// Get the stored credential pair, if any.
    pub async fn get_credential(
        &self,
        secret_id: &str,
    ) -> Result<Option<StoredCredential>, AppError> {
        match &self.inner {
            DbInner::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::CREDENTIALS)
                .obj()
                .one(secret_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            DbInner::Memory(slot) => Ok(slot.read().await.clone()),
            DbInner::Offline => Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            )),
        }
    }

    /// Replace the stored credential pair with a new one.
    ///
    /// A single-document write, so the pair is never observable half-updated.
    pub async fn set_credential(
        &self,
        secret_id: &str,
        credential: &StoredCredential,
    ) -> Result<(), AppError> {
        match &self.inner {
            DbInner::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::CREDENTIALS)
                    .document_id(secret_id)
                    .object(credential)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            DbInner::Memory(slot) => {
                *slot.write().await = Some(credential.clone());
                Ok(())
            }
            DbInner::Offline => Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            )),
        }
    }
}
