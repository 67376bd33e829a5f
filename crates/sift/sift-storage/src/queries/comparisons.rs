//! Queries for the performance_comparisons table.

use rusqlite::{params, Connection};
use serde::Serialize;
use sift_core::errors::StorageError;
use sift_core::types::ComparisonResult;

/// A stored comparison joined with the recommendation it measured.
#[derive(Debug, Clone, Serialize)]
pub struct IndexImpactRow {
    pub comparison_id: i64,
    pub table_name: String,
    pub column_name: String,
    pub index_name: String,
    pub original_time_ms: f64,
    pub optimized_time_ms: f64,
    pub improvement_percent: f64,
    pub timestamp: i64,
}

/// Store a successful comparison. Returns the row id.
pub fn insert(
    conn: &Connection,
    query_id: Option<i64>,
    index_id: Option<i64>,
    result: &ComparisonResult,
    timestamp: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO performance_comparisons
            (query_id, original_time, optimized_time, improvement_percent, index_id, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            query_id,
            result.original_time_ms,
            result.optimized_time_ms,
            result.improvement_percent,
            index_id,
            timestamp
        ],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Recent comparisons that are linked to a recommendation, newest first.
pub fn query_index_impact(conn: &Connection, limit: usize) -> Result<Vec<IndexImpactRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT pc.id, ir.table_name, ir.column_name, ir.index_name,
                    pc.original_time, pc.optimized_time, pc.improvement_percent, pc.timestamp
             FROM performance_comparisons pc
             JOIN index_recommendations ir ON pc.index_id = ir.id
             ORDER BY pc.timestamp DESC, pc.id DESC
             LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(IndexImpactRow {
                comparison_id: row.get(0)?,
                table_name: row.get(1)?,
                column_name: row.get(2)?,
                index_name: row.get(3)?,
                original_time_ms: row.get(4)?,
                optimized_time_ms: row.get(5)?,
                improvement_percent: row.get(6)?,
                timestamp: row.get(7)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count stored comparisons.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM performance_comparisons", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
