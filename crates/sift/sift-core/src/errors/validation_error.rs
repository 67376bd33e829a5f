//! Empirical validation errors.

use super::error_code::{self, SiftErrorCode};
use super::EngineError;

/// Phase-specific failures of an index comparison.
///
/// A failure of the re-measurement phase is not an error: it is reported
/// through `ComparisonResult::success == false` after cleanup has run.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Original query execution failed: {0}")]
    QueryExecution(EngineError),

    #[error("Invalid CREATE INDEX statement: {statement}")]
    MalformedStatement { statement: String },

    #[error("Failed to create index: {0}")]
    IndexCreation(EngineError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SiftErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::QueryExecution(_) => error_code::QUERY_EXECUTION_ERROR,
            Self::MalformedStatement { .. } => error_code::MALFORMED_STATEMENT,
            Self::IndexCreation(_) => error_code::INDEX_CREATION_ERROR,
            Self::Engine(e) => e.error_code(),
        }
    }
}
