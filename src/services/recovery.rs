// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recovery sync pipeline.
//!
//! Handles the core workflow:
//! 1. Fetch the recovery record for a cycle
//! 2. Skip recoveries that are not yet scored (scoring is asynchronous
//!    upstream; the event is redelivered once finalized)
//! 3. Fetch the sleep session backing the recovery
//! 4. Derive the daily entry (date, score fractions, time asleep)
//! 5. Upsert into the Notion tracking database, keyed by date

use crate::error::{AppError, Result};
use crate::models::{DailyEntry, EventId};
use crate::services::notion::NotionClient;
use crate::services::whoop::{ScoreState, WhoopService, WhoopSleep};

/// Processes a recovery event end to end.
pub struct RecoveryProcessor {
    whoop: WhoopService,
    notion: NotionClient,
}

/// Result of processing a recovery event.
#[derive(Debug)]
pub struct SyncResult {
    pub date: String,
    /// Whether an existing page was updated rather than a new one created
    pub updated_existing: bool,
}

impl RecoveryProcessor {
    pub fn new(whoop: WhoopService, notion: NotionClient) -> Self {
        Self { whoop, notion }
    }

    /// Process a recovery event by cycle id.
    ///
    /// Returns `None` when the recovery is not yet scored; nothing is
    /// fetched or written in that case.
    pub async fn process_recovery(&self, cycle_id: &EventId) -> Result<Option<SyncResult>> {
        tracing::info!(cycle_id = %cycle_id, "Processing recovery");

        // 1. Fetch recovery (credential lookup is handled by WhoopService)
        let recovery = self.whoop.get_recovery(cycle_id).await?;

        // 2. Gate on score state
        if recovery.score_state != ScoreState::Scored {
            tracing::info!(
                cycle_id = %cycle_id,
                state = ?recovery.score_state,
                "Recovery not scored, skipping"
            );
            return Ok(None);
        }

        let score = recovery.score.as_ref().ok_or_else(|| {
            AppError::WhoopApi(format!(
                "recovery for cycle {} is SCORED but carries no score",
                cycle_id
            ))
        })?;

        // 3. Fetch the sleep session behind this recovery
        let sleep = self.whoop.get_sleep(&recovery.sleep_id).await?;

        // 4. Derive the daily entry
        let entry = build_entry(score.recovery_score, &sleep)?;

        tracing::info!(
            cycle_id = %cycle_id,
            date = %entry.date,
            sleep_ms = entry.sleep_ms,
            "Derived daily entry"
        );

        // 5. Upsert by date. Find-then-write is not transactional: two
        //    concurrent deliveries for the same date can both see no entry
        //    and both create. Accepted; duplicate same-date deliveries are
        //    rare and sequential redelivery lands on the update path.
        let updated_existing = match self.notion.find_entry(&entry.date).await? {
            Some(page_id) => {
                self.notion.update_entry(&page_id, &entry).await?;
                true
            }
            None => {
                self.notion.create_entry(&entry).await?;
                false
            }
        };

        tracing::info!(
            cycle_id = %cycle_id,
            date = %entry.date,
            updated_existing,
            "Daily entry stored"
        );

        Ok(Some(SyncResult {
            date: entry.date,
            updated_existing,
        }))
    }
}

/// Derive a daily entry from a scored recovery and its sleep session.
fn build_entry(recovery_score: f64, sleep: &WhoopSleep) -> Result<DailyEntry> {
    let score = sleep.score.as_ref().ok_or_else(|| {
        AppError::WhoopApi(format!("sleep ending {} carries no score", sleep.end))
    })?;
    let stages = &score.stage_summary;

    // Unclamped: if upstream ever reports awake time exceeding in-bed time
    // the negative value is stored as-is rather than silently corrected.
    let sleep_ms = stages.total_in_bed_time_milli - stages.total_awake_time_milli;

    // The entry date is the calendar day the sleep ended on.
    let date = sleep.end.get(..10).ok_or_else(|| {
        AppError::WhoopApi(format!("sleep end '{}' is not an ISO timestamp", sleep.end))
    })?;

    Ok(DailyEntry {
        date: date.to_string(),
        recovery_pct: recovery_score * 0.01,
        sleep_performance_pct: score.sleep_performance_percentage * 0.01,
        sleep_ms,
    })
}
