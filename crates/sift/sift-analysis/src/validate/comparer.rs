//! Before/after measurement of a candidate index.

use std::time::Instant;

use sift_core::errors::{EngineError, ValidationError};
use sift_core::traits::StorageEngine;
use sift_core::types::{ComparisonResult, FxHashSet};

use super::index_statement::index_name;

/// Measures a query with and without a transient index.
pub struct Validator;

impl Validator {
    /// Time `query`, create the index, time `query` again, drop the index.
    ///
    /// Every index that appears between the create and the second run is
    /// dropped afterwards, including when the second run fails, so the index
    /// set is unchanged on return. Indexes that existed before the call are
    /// never dropped.
    pub fn compare<E>(
        engine: &E,
        query: &str,
        create_statement: &str,
    ) -> Result<ComparisonResult, ValidationError>
    where
        E: StorageEngine + ?Sized,
    {
        let query = query.trim();

        let original_secs = timed(engine, query).map_err(ValidationError::QueryExecution)?;

        let name = index_name(create_statement).ok_or_else(|| ValidationError::MalformedStatement {
            statement: create_statement.to_string(),
        })?;
        let before = index_set(engine)?;

        engine
            .execute(create_statement)
            .map_err(ValidationError::IndexCreation)?;
        tracing::debug!(index = %name, "created transient index");

        let optimized = timed(engine, query);

        let created = match index_set(engine) {
            Ok(after) => {
                let mut created: Vec<String> = after.difference(&before).cloned().collect();
                created.sort();
                created
            }
            Err(e) => {
                tracing::warn!(index = %name, error = %e, "index introspection failed after create");
                if before.contains(&name) {
                    Vec::new()
                } else {
                    vec![name.clone()]
                }
            }
        };
        let failures: Vec<String> = created
            .iter()
            .filter_map(|index| drop_index(engine, index))
            .collect();
        let cleanup_warning = (!failures.is_empty()).then(|| failures.join("; "));

        let mut result = match optimized {
            Ok(optimized_secs) => ComparisonResult::measured(original_secs, optimized_secs),
            Err(e) => ComparisonResult::failed(format!("Query with index failed: {e}")),
        };
        result.cleanup_warning = cleanup_warning;

        tracing::info!(
            index = %name,
            success = result.success,
            original_ms = result.original_time_ms,
            optimized_ms = result.optimized_time_ms,
            improvement = result.improvement_percent,
            "index comparison"
        );
        Ok(result)
    }
}

/// Wall-clock seconds to execute `sql` and fetch all rows.
fn timed<E>(engine: &E, sql: &str) -> Result<f64, EngineError>
where
    E: StorageEngine + ?Sized,
{
    let start = Instant::now();
    engine.execute(sql)?;
    Ok(start.elapsed().as_secs_f64())
}

/// Names of all indexes on all tables of the engine session.
fn index_set<E>(engine: &E) -> Result<FxHashSet<String>, EngineError>
where
    E: StorageEngine + ?Sized,
{
    let mut names = FxHashSet::default();
    for table in engine.list_tables()? {
        names.extend(engine.index_names(&table)?);
    }
    Ok(names)
}

/// Drop the transient index. Returns the failure text, if any.
fn drop_index<E>(engine: &E, name: &str) -> Option<String>
where
    E: StorageEngine + ?Sized,
{
    let ident = if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    };
    match engine.execute(&format!("DROP INDEX IF EXISTS {ident}")) {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(index = %name, error = %e, "failed to drop transient index");
            Some(format!("Failed to drop index {name}: {e}"))
        }
    }
}
