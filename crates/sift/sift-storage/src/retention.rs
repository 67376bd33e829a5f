//! Data retention for the query log database.
//!
//! Query log rows older than the retention window are deleted together with
//! the comparisons that reference them. Recommendations are kept: they are
//! few and carry the applied flag.

use rusqlite::{params, Connection};
use serde::Serialize;
use sift_core::config::RetentionConfig;
use sift_core::errors::StorageError;
use sift_core::types::query_log::epoch_now;

use crate::connection::DatabaseManager;

/// Configurable retention period.
#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    /// Query log rows older than this are deleted (default 30 days).
    pub log_retention_days: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            log_retention_days: 30,
        }
    }
}

impl From<&RetentionConfig> for RetentionPolicy {
    fn from(config: &RetentionConfig) -> Self {
        Self {
            log_retention_days: config.effective_log_retention_days(),
        }
    }
}

/// Report of what was cleaned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionReport {
    pub total_deleted: u64,
    pub per_table: Vec<TableCleanup>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCleanup {
    pub table: String,
    pub deleted: u64,
}

/// Apply the retention policy relative to `now` (Unix seconds).
///
/// Runs inside a single transaction. Returns a report of how many rows were
/// deleted per table.
pub fn apply_retention(
    conn: &Connection,
    policy: &RetentionPolicy,
    now: i64,
) -> Result<RetentionReport, StorageError> {
    let start = std::time::Instant::now();
    let mut report = RetentionReport::default();
    let cutoff = now - i64::from(policy.log_retention_days) * 86_400;

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| StorageError::SqliteError {
            message: format!("retention begin: {e}"),
        })?;

    // Dependents first so the foreign key on query_id never dangles.
    let deleted = tx
        .execute(
            "DELETE FROM performance_comparisons
             WHERE query_id IN (SELECT id FROM query_logs WHERE timestamp < ?1)",
            params![cutoff],
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    record(&mut report, "performance_comparisons", deleted);

    let deleted = tx
        .execute("DELETE FROM query_logs WHERE timestamp < ?1", params![cutoff])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    record(&mut report, "query_logs", deleted);

    tx.commit()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    report.duration_ms = start.elapsed().as_millis() as u64;
    report.total_deleted = report.per_table.iter().map(|t| t.deleted).sum();
    tracing::info!(
        retention_deleted = report.total_deleted,
        cutoff,
        "applied query log retention"
    );
    Ok(report)
}

impl DatabaseManager {
    /// Apply `policy` to the log database as of now.
    pub fn apply_retention(&self, policy: &RetentionPolicy) -> Result<RetentionReport, StorageError> {
        self.with_writer(|conn| apply_retention(conn, policy, epoch_now()))
    }
}

fn record(report: &mut RetentionReport, table: &str, deleted: usize) {
    if deleted > 0 {
        report.per_table.push(TableCleanup {
            table: table.to_string(),
            deleted: deleted as u64,
        });
    }
}
