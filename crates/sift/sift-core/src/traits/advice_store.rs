//! AdviceStore trait: persistence of recommendations and measured outcomes.

use crate::errors::StorageError;
use crate::types::{ComparisonResult, IndexCandidate};

pub trait AdviceStore {
    /// Persist a ranked candidate list. Returns row ids in input order.
    fn save_recommendations(
        &self,
        candidates: &[IndexCandidate],
        timestamp: i64,
    ) -> Result<Vec<i64>, StorageError>;

    /// Flag a stored recommendation as applied.
    fn mark_applied(&self, recommendation_id: i64) -> Result<(), StorageError>;

    /// Persist a comparison. Failed comparisons carry no timings and are not
    /// stored; `None` is returned for them.
    fn record_comparison(
        &self,
        query_id: Option<i64>,
        index_id: Option<i64>,
        result: &ComparisonResult,
        timestamp: i64,
    ) -> Result<Option<i64>, StorageError>;
}
