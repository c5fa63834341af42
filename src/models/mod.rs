// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credential;
pub mod entry;
pub mod webhook;

pub use credential::StoredCredential;
pub use entry::DailyEntry;
pub use webhook::{EventId, WebhookEvent};
