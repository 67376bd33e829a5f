//! Store trait implementations backed by the log database.

use sift_core::errors::StorageError;
use sift_core::traits::{AdviceStore, FrequentQuery, QueryLogStore};
use sift_core::types::{ComparisonResult, IndexCandidate, NewQueryLogEntry, QueryLogEntry};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{comparisons, query_logs, recommendations};

impl QueryLogStore for DatabaseManager {
    fn append(&self, entry: NewQueryLogEntry) -> Result<QueryLogEntry, StorageError> {
        let id = self.with_writer(|conn| query_logs::insert(conn, &entry))?;
        Ok(entry.with_id(id))
    }

    fn recent(&self, limit: usize) -> Result<Vec<QueryLogEntry>, StorageError> {
        self.with_reader(|conn| query_logs::query_recent(conn, limit))
    }

    fn slow(&self, threshold_secs: f64, limit: usize) -> Result<Vec<QueryLogEntry>, StorageError> {
        self.with_reader(|conn| query_logs::query_slow(conn, threshold_secs, limit))
    }

    fn frequent(&self, limit: usize) -> Result<Vec<FrequentQuery>, StorageError> {
        self.with_reader(|conn| query_logs::query_frequent(conn, limit))
    }
}

impl AdviceStore for DatabaseManager {
    fn save_recommendations(
        &self,
        candidates: &[IndexCandidate],
        timestamp: i64,
    ) -> Result<Vec<i64>, StorageError> {
        self.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                candidates
                    .iter()
                    .map(|c| recommendations::insert(tx, c, timestamp))
                    .collect()
            })
        })
    }

    fn mark_applied(&self, recommendation_id: i64) -> Result<(), StorageError> {
        self.with_writer(|conn| recommendations::mark_applied(conn, recommendation_id))
    }

    fn record_comparison(
        &self,
        query_id: Option<i64>,
        index_id: Option<i64>,
        result: &ComparisonResult,
        timestamp: i64,
    ) -> Result<Option<i64>, StorageError> {
        if !result.success {
            return Ok(None);
        }
        self.with_writer(|conn| comparisons::insert(conn, query_id, index_id, result, timestamp))
            .map(Some)
    }
}
