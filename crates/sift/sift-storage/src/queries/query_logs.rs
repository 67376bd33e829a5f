//! Queries for the query_logs table, the append-only log of captured statements.

use rusqlite::{params, Connection, Row};
use sift_core::errors::StorageError;
use sift_core::traits::FrequentQuery;
use sift_core::types::{NewQueryLogEntry, QueryLogEntry};

const COLUMNS: &str = "id, query, execution_time, execution_plan, timestamp";

fn map_row(row: &Row<'_>) -> rusqlite::Result<QueryLogEntry> {
    Ok(QueryLogEntry {
        id: row.get(0)?,
        query_text: row.get(1)?,
        execution_time_secs: row.get(2)?,
        execution_plan: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

/// Insert a log entry. Returns the row id.
pub fn insert(conn: &Connection, entry: &NewQueryLogEntry) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO query_logs (query, execution_time, execution_plan, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.query_text,
            entry.execution_time_secs,
            entry.execution_plan,
            entry.timestamp
        ],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Fetch one entry by id.
pub fn get(conn: &Connection, id: i64) -> Result<Option<QueryLogEntry>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM query_logs WHERE id = ?1"))
        .map_err(sqlite_err)?;
    let mut rows = stmt.query_map(params![id], map_row).map_err(sqlite_err)?;
    let entry = rows.next().transpose().map_err(sqlite_err)?;
    Ok(entry)
}

/// Most recent entries first. Ties on timestamp resolve by id so that
/// entries captured within the same second keep their capture order.
pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<QueryLogEntry>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM query_logs ORDER BY timestamp DESC, id DESC LIMIT ?1"
        ))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![limit as i64], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Entries slower than `threshold_secs`, slowest first.
pub fn query_slow(
    conn: &Connection,
    threshold_secs: f64,
    limit: usize,
) -> Result<Vec<QueryLogEntry>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM query_logs WHERE execution_time > ?1
             ORDER BY execution_time DESC LIMIT ?2"
        ))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![threshold_secs, limit as i64], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Statement texts grouped by frequency, most frequent first.
pub fn query_frequent(conn: &Connection, limit: usize) -> Result<Vec<FrequentQuery>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT query, COUNT(*) AS count, AVG(execution_time) AS avg_time
             FROM query_logs GROUP BY query
             ORDER BY count DESC, MIN(id) ASC LIMIT ?1",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(FrequentQuery {
                query_text: row.get(0)?,
                count: row.get(1)?,
                avg_execution_time_secs: row.get(2)?,
            })
        })
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Count total log entries.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM query_logs", [], |row| row.get(0))
        .map_err(sqlite_err)
}
