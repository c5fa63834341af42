//! Database layer (Firestore).

pub mod firestore;

pub use firestore::CredentialDb;

/// Collection names as constants.
pub mod collections {
    /// OAuth credential documents, keyed by secret id
    pub const CREDENTIALS: &str = "credentials";
}
