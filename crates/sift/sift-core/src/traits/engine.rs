//! StorageEngine trait: adapter over the observed relational store.
//!
//! One value is one engine session. Exactly one statement may be in flight
//! per session, so callers share an engine behind a lock (see the advisor
//! facade) and every method returns fully materialized results.

use crate::errors::EngineError;
use crate::types::{ColumnInfo, IndexColumn, IndexInfo, QueryOutput};

pub trait StorageEngine {
    /// Execute one statement and fetch all of its rows.
    fn execute(&self, sql: &str) -> Result<QueryOutput, EngineError>;

    /// Describe how the engine would run `sql`, one plan step per line.
    fn explain(&self, sql: &str) -> Result<String, EngineError>;

    /// True when `explain` compiles the statement without applying any of
    /// its side effects.
    fn explain_is_pure(&self) -> bool {
        false
    }

    /// Names of all user tables.
    fn list_tables(&self) -> Result<Vec<String>, EngineError>;

    /// Columns of `table` in declaration order.
    fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, EngineError>;

    /// Indexes attached to `table`.
    fn table_indexes(&self, table: &str) -> Result<Vec<IndexInfo>, EngineError>;

    /// Key columns of `index` in key order.
    fn index_columns(&self, index: &str) -> Result<Vec<IndexColumn>, EngineError>;

    /// Names of the indexes on `table`, sorted.
    fn index_names(&self, table: &str) -> Result<Vec<String>, EngineError> {
        let mut names: Vec<String> = self
            .table_indexes(table)?
            .into_iter()
            .map(|i| i.name)
            .collect();
        names.sort();
        Ok(names)
    }
}

impl<T: StorageEngine + ?Sized> StorageEngine for &T {
    fn execute(&self, sql: &str) -> Result<QueryOutput, EngineError> {
        (**self).execute(sql)
    }
    fn explain(&self, sql: &str) -> Result<String, EngineError> {
        (**self).explain(sql)
    }
    fn explain_is_pure(&self) -> bool {
        (**self).explain_is_pure()
    }
    fn list_tables(&self) -> Result<Vec<String>, EngineError> {
        (**self).list_tables()
    }
    fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, EngineError> {
        (**self).table_columns(table)
    }
    fn table_indexes(&self, table: &str) -> Result<Vec<IndexInfo>, EngineError> {
        (**self).table_indexes(table)
    }
    fn index_columns(&self, index: &str) -> Result<Vec<IndexColumn>, EngineError> {
        (**self).index_columns(index)
    }
}
