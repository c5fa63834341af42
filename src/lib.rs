// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Whoop-Journal: sync WHOOP recovery into a Notion daily journal
//!
//! This crate receives WHOOP webhooks, verifies their signatures, and writes
//! the derived sleep/recovery metrics into a Notion tracking database. A
//! scheduled task rotates the shared WHOOP OAuth credential.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{CredentialManager, NotionClient, SignatureVerifier, WhoopService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialManager,
    pub whoop: WhoopService,
    pub notion: NotionClient,
    pub signature: SignatureVerifier,
}
