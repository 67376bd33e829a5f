//! Permanent application of a recommended index.

use serde::Serialize;
use sift_core::errors::ValidationError;
use sift_core::traits::StorageEngine;

use super::index_statement::{index_name, IndexStatement};

/// An index created by `apply_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedIndex {
    pub index_name: String,
    /// The statement actually executed.
    pub statement: String,
}

/// Normalize `create_statement` and execute it.
///
/// Spacing inside the column list is normalized and the statement rebuilt
/// when it parses fully; otherwise the trimmed text runs as given.
pub fn apply_index<E>(engine: &E, create_statement: &str) -> Result<AppliedIndex, ValidationError>
where
    E: StorageEngine + ?Sized,
{
    let trimmed = create_statement.trim();
    let name = index_name(trimmed).ok_or_else(|| ValidationError::MalformedStatement {
        statement: create_statement.to_string(),
    })?;
    let statement = match IndexStatement::parse(trimmed) {
        Some(parsed) => parsed.to_string(),
        None => trimmed.to_string(),
    };

    engine
        .execute(&statement)
        .map_err(ValidationError::IndexCreation)?;
    tracing::info!(index = %name, "applied index");

    Ok(AppliedIndex {
        index_name: name,
        statement,
    })
}
