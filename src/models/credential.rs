//! Stored OAuth credential pair.

use serde::{Deserialize, Serialize};

/// WHOOP OAuth token pair, stored as a single Firestore document.
///
/// The document is only ever replaced whole, never field-by-field, so a
/// reader always observes a matched access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Bearer token for WHOOP API calls
    pub access_token: String,
    /// Token redeemed against the OAuth endpoint during rotation
    pub refresh_token: String,
}
