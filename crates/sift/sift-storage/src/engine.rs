//! SqliteEngine: storage engine adapter over an observed SQLite database.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use sift_core::errors::EngineError;
use sift_core::traits::StorageEngine;
use sift_core::types::{ColumnInfo, IndexColumn, IndexInfo, QueryOutput, SqlValue};

use crate::connection::pragmas::apply_session_pragmas;

/// One session on an observed SQLite database.
///
/// `Connection` is not `Sync`; share a session behind a lock.
pub struct SqliteEngine {
    conn: Connection,
}

fn engine_err(e: rusqlite::Error) -> EngineError {
    EngineError::sqlite(e.to_string())
}

impl SqliteEngine {
    /// Open a session on the database at `path`.
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let conn = Connection::open(path).map_err(engine_err)?;
        Self::from_connection(conn)
    }

    /// Open a session on a private in-memory database.
    pub fn open_in_memory() -> Result<Self, EngineError> {
        let conn = Connection::open_in_memory().map_err(engine_err)?;
        Self::from_connection(conn)
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Result<Self, EngineError> {
        apply_session_pragmas(&conn).map_err(engine_err)?;
        Ok(Self { conn })
    }

    /// Run a batch of statements without collecting results (schema setup).
    pub fn execute_batch(&self, sql: &str) -> Result<(), EngineError> {
        self.conn.execute_batch(sql).map_err(engine_err)
    }

    /// Row count of `table`.
    pub fn row_count(&self, table: &str) -> Result<i64, EngineError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(engine_err)
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StorageEngine for SqliteEngine {
    fn execute(&self, sql: &str) -> Result<QueryOutput, EngineError> {
        let mut stmt = self.conn.prepare(sql.trim()).map_err(engine_err)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        if columns.is_empty() {
            let rows_affected = stmt.execute([]).map_err(engine_err)?;
            return Ok(QueryOutput {
                columns,
                rows: Vec::new(),
                rows_affected,
            });
        }

        let width = columns.len();
        let mut out = Vec::new();
        let mut rows = stmt.query([]).map_err(engine_err)?;
        while let Some(row) = rows.next().map_err(engine_err)? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(to_sql_value(row.get_ref(i).map_err(engine_err)?));
            }
            out.push(values);
        }
        drop(rows);

        Ok(QueryOutput {
            columns,
            rows: out,
            rows_affected: 0,
        })
    }

    fn explain(&self, sql: &str) -> Result<String, EngineError> {
        let plan_sql = format!("EXPLAIN QUERY PLAN {}", sql.trim());
        let mut stmt = self.conn.prepare(&plan_sql).map_err(engine_err)?;
        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let parent: i64 = row.get(1)?;
                let notused: i64 = row.get(2)?;
                let detail: String = row.get(3)?;
                Ok(format!("{id}|{parent}|{notused}|{detail}"))
            })
            .map_err(engine_err)?;
        let lines = rows.collect::<Result<Vec<_>, _>>().map_err(engine_err)?;
        Ok(lines.join("\n"))
    }

    /// SQLite compiles the statement for EXPLAIN QUERY PLAN but never runs it.
    fn explain_is_pure(&self) -> bool {
        true
    }

    fn list_tables(&self) -> Result<Vec<String>, EngineError> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .map_err(engine_err)?;
        let rows = stmt.query_map([], |row| row.get(0)).map_err(engine_err)?;
        rows.collect::<Result<Vec<String>, _>>().map_err(engine_err)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, EngineError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(engine_err)?;
        let rows = stmt
            .query_map(params![table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                    is_primary_key: row.get::<_, i64>(2)? != 0,
                })
            })
            .map_err(engine_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(engine_err)
    }

    fn table_indexes(&self, table: &str) -> Result<Vec<IndexInfo>, EngineError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, \"unique\" FROM pragma_index_list(?1) ORDER BY seq")
            .map_err(engine_err)?;
        let rows = stmt
            .query_map(params![table], |row| {
                Ok(IndexInfo {
                    name: row.get(0)?,
                    unique: row.get::<_, i64>(1)? != 0,
                })
            })
            .map_err(engine_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(engine_err)
    }

    fn index_columns(&self, index: &str) -> Result<Vec<IndexColumn>, EngineError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT seqno, cid, name FROM pragma_index_info(?1) ORDER BY seqno")
            .map_err(engine_err)?;
        let rows = stmt
            .query_map(params![index], |row| {
                Ok(IndexColumn {
                    seqno: row.get(0)?,
                    cid: row.get(1)?,
                    name: row.get(2)?,
                })
            })
            .map_err(engine_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(engine_err)
    }
}

fn to_sql_value(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(v) => SqlValue::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => SqlValue::Blob(v.to_vec()),
    }
}

/// Quote an identifier for interpolation into SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
