// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod notion;
pub mod recovery;
pub mod signature;
pub mod whoop;

pub use credentials::CredentialManager;
pub use notion::NotionClient;
pub use recovery::RecoveryProcessor;
pub use signature::SignatureVerifier;
pub use whoop::{WhoopClient, WhoopService};
