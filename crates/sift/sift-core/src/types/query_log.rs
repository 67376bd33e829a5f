//! Query log records written by capture and read by the recommender.

use serde::{Deserialize, Serialize};

/// One captured statement. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub id: i64,
    pub query_text: String,
    /// Wall-clock duration of the timed run, in seconds. Never negative.
    pub execution_time_secs: f64,
    /// Plan text, one plan row per line.
    pub execution_plan: String,
    /// Unix epoch seconds.
    pub timestamp: i64,
}

/// A log record before it has been assigned an id by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQueryLogEntry {
    pub query_text: String,
    pub execution_time_secs: f64,
    pub execution_plan: String,
    pub timestamp: i64,
}

impl NewQueryLogEntry {
    /// Build an entry stamped with the current time. Negative durations are
    /// clamped to zero.
    pub fn now(query_text: impl Into<String>, execution_time_secs: f64, plan: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            execution_time_secs: execution_time_secs.max(0.0),
            execution_plan: plan.into(),
            timestamp: epoch_now(),
        }
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: i64) -> QueryLogEntry {
        QueryLogEntry {
            id,
            query_text: self.query_text,
            execution_time_secs: self.execution_time_secs,
            execution_plan: self.execution_plan,
            timestamp: self.timestamp,
        }
    }
}

/// Current Unix time in seconds.
pub fn epoch_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
