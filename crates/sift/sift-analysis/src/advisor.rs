//! IndexAdvisor: facade tying capture, recommendation and validation
//! to one engine session and one log store.
//!
//! The engine session admits one statement at a time, so it lives behind a
//! mutex. A comparison holds the lock across all four of its phases; the
//! transient index is gone before any other caller can reach the session.

use std::sync::{Mutex, MutexGuard};

use sift_core::config::SiftConfig;
use sift_core::errors::{AdvisorError, EngineError};
use sift_core::traits::{AdviceStore, FrequentQuery, QueryLogStore, StorageEngine};
use sift_core::types::query_log::epoch_now;
use sift_core::types::{ComparisonResult, IndexCandidate, QueryLogEntry};

use crate::capture::{CaptureResult, QueryCapture};
use crate::recommend::{IndexSnapshot, Recommender, RecommenderConfig};
use crate::validate::{apply_index, AppliedIndex, Validator};

pub struct IndexAdvisor<E, L> {
    engine: Mutex<E>,
    store: L,
    capture: QueryCapture,
    recommender: Recommender,
    log_window: usize,
    recommendation_limit: usize,
}

impl<E, L> IndexAdvisor<E, L>
where
    E: StorageEngine,
    L: QueryLogStore,
{
    pub fn new(engine: E, store: L, config: &SiftConfig) -> Self {
        Self {
            engine: Mutex::new(engine),
            store,
            capture: QueryCapture::from(&config.capture),
            recommender: Recommender::new(RecommenderConfig::from(config)),
            log_window: config.analysis.effective_log_window(),
            recommendation_limit: config.analysis.effective_recommendation_limit(),
        }
    }

    pub fn with_defaults(engine: E, store: L) -> Self {
        Self::new(engine, store, &SiftConfig::default())
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, E>, EngineError> {
        self.engine.lock().map_err(|_| EngineError::LockPoisoned)
    }

    /// Run `f` against the engine session while holding the session lock.
    pub fn with_engine<T>(&self, f: impl FnOnce(&E) -> T) -> Result<T, AdvisorError> {
        let engine = self.lock_engine()?;
        Ok(f(&engine))
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    /// Execute and log `query`.
    pub fn capture(&self, query: &str) -> Result<CaptureResult, AdvisorError> {
        let engine = self.lock_engine()?;
        Ok(self.capture.capture(&*engine, &self.store, query)?)
    }

    /// Rank candidates over the most recent `log_window` entries. `None`
    /// uses the configured limit.
    pub fn recommend(&self, limit: Option<usize>) -> Result<Vec<IndexCandidate>, AdvisorError> {
        let window = self.store.recent(self.log_window)?;
        let tables = self.recommender.referenced_tables(&window);
        let snapshot = {
            let engine = self.lock_engine()?;
            IndexSnapshot::load(&*engine, &tables)
        };
        let limit = limit.unwrap_or(self.recommendation_limit);
        Ok(self.recommender.recommend(&window, &snapshot, limit))
    }

    /// Measure `query` with and without the index `create_statement` builds.
    pub fn compare(&self, query: &str, create_statement: &str) -> Result<ComparisonResult, AdvisorError> {
        let engine = self.lock_engine()?;
        Ok(Validator::compare(&*engine, query, create_statement)?)
    }

    /// Create the index permanently.
    pub fn apply_index(&self, create_statement: &str) -> Result<AppliedIndex, AdvisorError> {
        let engine = self.lock_engine()?;
        Ok(apply_index(&*engine, create_statement)?)
    }

    /// Most recent log entries first.
    pub fn query_logs(&self, limit: usize) -> Result<Vec<QueryLogEntry>, AdvisorError> {
        Ok(self.store.recent(limit)?)
    }

    pub fn slow_queries(&self, threshold_secs: f64, limit: usize) -> Result<Vec<QueryLogEntry>, AdvisorError> {
        Ok(self.store.slow(threshold_secs, limit)?)
    }

    pub fn frequent_queries(&self, limit: usize) -> Result<Vec<FrequentQuery>, AdvisorError> {
        Ok(self.store.frequent(limit)?)
    }
}

impl<E, L> IndexAdvisor<E, L>
where
    E: StorageEngine,
    L: QueryLogStore + AdviceStore,
{
    /// Persist a ranked list. Returns row ids in list order.
    pub fn save_recommendations(&self, candidates: &[IndexCandidate]) -> Result<Vec<i64>, AdvisorError> {
        Ok(self.store.save_recommendations(candidates, epoch_now())?)
    }

    /// Persist a comparison outcome; failed comparisons are skipped.
    pub fn record_comparison(
        &self,
        query_id: Option<i64>,
        recommendation_id: Option<i64>,
        result: &ComparisonResult,
    ) -> Result<Option<i64>, AdvisorError> {
        Ok(self
            .store
            .record_comparison(query_id, recommendation_id, result, epoch_now())?)
    }

    /// Apply a stored recommendation and flag it as applied.
    pub fn apply_recommendation(
        &self,
        recommendation_id: i64,
        create_statement: &str,
    ) -> Result<AppliedIndex, AdvisorError> {
        let applied = self.apply_index(create_statement)?;
        self.store.mark_applied(recommendation_id)?;
        Ok(applied)
    }
}
