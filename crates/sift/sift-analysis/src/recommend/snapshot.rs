//! Indexed-column snapshot of the observed database.

use sift_core::errors::EngineError;
use sift_core::traits::StorageEngine;
use sift_core::types::collections::{FxHashMap, FxHashSet};

/// Table → columns covered by at least one existing index.
/// Names are compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    indexed: FxHashMap<String, FxHashSet<String>>,
}

impl IndexSnapshot {
    /// Introspect the indexes of `tables`. A table whose introspection fails
    /// is logged and treated as having no indexed columns.
    pub fn load<E, S>(engine: &E, tables: &[S]) -> Self
    where
        E: StorageEngine + ?Sized,
        S: AsRef<str>,
    {
        let mut snapshot = Self::default();
        for table in tables {
            let table = table.as_ref();
            let columns = match indexed_columns(engine, table) {
                Ok(columns) => columns,
                Err(e) => {
                    tracing::warn!(table, error = %e, "index introspection failed; assuming no indexed columns");
                    FxHashSet::default()
                }
            };
            snapshot.indexed.insert(table.to_ascii_lowercase(), columns);
        }
        snapshot
    }

    /// Build a snapshot from literal `(table, columns)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let mut snapshot = Self::default();
        for (table, columns) in pairs {
            snapshot
                .indexed
                .entry(table.to_ascii_lowercase())
                .or_default()
                .extend(columns.iter().map(|c| c.to_ascii_lowercase()));
        }
        snapshot
    }

    pub fn is_indexed(&self, table: &str, column: &str) -> bool {
        self.indexed
            .get(&table.to_ascii_lowercase())
            .is_some_and(|cols| cols.contains(&column.to_ascii_lowercase()))
    }
}

/// Key columns of every index on `table`. Index positions are mapped to names
/// through the table's column list when the engine reports no name.
fn indexed_columns<E>(engine: &E, table: &str) -> Result<FxHashSet<String>, EngineError>
where
    E: StorageEngine + ?Sized,
{
    let table_columns = engine.table_columns(table)?;
    let mut indexed = FxHashSet::default();
    for index in engine.table_indexes(table)? {
        for key in engine.index_columns(&index.name)? {
            let name = key.name.or_else(|| {
                usize::try_from(key.cid)
                    .ok()
                    .and_then(|cid| table_columns.get(cid))
                    .map(|c| c.name.clone())
            });
            if let Some(name) = name {
                indexed.insert(name.to_ascii_lowercase());
            }
        }
    }
    Ok(indexed)
}
