//! Queries for the index_recommendations table.

use rusqlite::{params, Connection};
use serde::Serialize;
use sift_core::errors::StorageError;
use sift_core::types::IndexCandidate;

/// A stored recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRow {
    pub id: i64,
    pub table_name: String,
    pub column_name: String,
    pub score: f64,
    pub index_type: String,
    pub index_name: String,
    pub create_statement: String,
    pub applied: bool,
    pub timestamp: i64,
}

/// Insert a candidate. Returns the row id.
pub fn insert(
    conn: &Connection,
    candidate: &IndexCandidate,
    timestamp: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO index_recommendations
            (table_name, column_name, score, index_type, index_name, create_statement, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            candidate.table,
            candidate.column_display(),
            candidate.score,
            candidate.index_type(),
            candidate.index_name,
            candidate.create_statement,
            timestamp
        ],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Flag a recommendation as applied to the schema.
pub fn mark_applied(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let changed = conn
        .execute(
            "UPDATE index_recommendations SET applied = 1 WHERE id = ?1",
            params![id],
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            entity: "recommendation",
            id,
        });
    }
    Ok(())
}

/// Most recent recommendations first.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<RecommendationRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, table_name, column_name, score, index_type, index_name,
                    create_statement, applied, timestamp
             FROM index_recommendations ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(RecommendationRow {
                id: row.get(0)?,
                table_name: row.get(1)?,
                column_name: row.get(2)?,
                score: row.get(3)?,
                index_type: row.get(4)?,
                index_name: row.get(5)?,
                create_statement: row.get(6)?,
                applied: row.get::<_, i64>(7)? != 0,
                timestamp: row.get(8)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
