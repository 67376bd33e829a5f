//! QueryLogStore trait: persistence of captured statements.

use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::types::{NewQueryLogEntry, QueryLogEntry};

/// Aggregate of identical statement texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentQuery {
    pub query_text: String,
    pub count: i64,
    pub avg_execution_time_secs: f64,
}

pub trait QueryLogStore {
    /// Persist one entry and return it with its assigned id.
    fn append(&self, entry: NewQueryLogEntry) -> Result<QueryLogEntry, StorageError>;

    /// Most recent entries first (timestamp, then id, descending).
    fn recent(&self, limit: usize) -> Result<Vec<QueryLogEntry>, StorageError>;

    /// Entries slower than `threshold_secs`, slowest first.
    fn slow(&self, threshold_secs: f64, limit: usize) -> Result<Vec<QueryLogEntry>, StorageError>;

    /// Statement texts grouped by frequency, most frequent first.
    fn frequent(&self, limit: usize) -> Result<Vec<FrequentQuery>, StorageError>;
}
