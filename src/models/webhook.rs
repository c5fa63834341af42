//! Inbound WHOOP webhook event.

use serde::Deserialize;
use std::fmt;

/// WHOOP webhook event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// WHOOP user the event belongs to
    pub user_id: i64,
    /// Id of the object the event refers to (cycle id for recovery events)
    pub id: EventId,
    /// Event type, e.g. "recovery.updated"
    #[serde(rename = "type")]
    pub event_type: String,
    /// Correlation id assigned by WHOOP
    pub trace_id: String,
}

/// Object id as delivered by WHOOP.
///
/// Cycle events carry integer ids while v2 sleep/workout events carry UUID
/// strings; accept both and render as text when building resource URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(n) => write!(f, "{}", n),
            EventId::Str(s) => f.write_str(s),
        }
    }
}
