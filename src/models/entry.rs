//! Daily tracking entry derived from WHOOP data.

use serde::{Deserialize, Serialize};

/// One day's recovery and sleep metrics, keyed by calendar date in the
/// Notion tracking database (at most one page per date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// ISO date (YYYY-MM-DD), the natural key
    pub date: String,
    /// Recovery score as a fraction (0.65 == 65%)
    pub recovery_pct: f64,
    /// Sleep performance as a fraction
    pub sleep_performance_pct: f64,
    /// Time asleep in milliseconds: in-bed minus awake, unclamped
    pub sleep_ms: i64,
}
