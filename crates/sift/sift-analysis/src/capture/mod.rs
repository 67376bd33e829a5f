//! Query capture: run a statement against the observed database, record its
//! plan and wall-clock duration, and append a log entry.

pub mod statement;

pub use statement::StatementKind;

use std::time::Instant;

use serde::Serialize;
use sift_core::config::CaptureConfig;
use sift_core::errors::CaptureError;
use sift_core::traits::{QueryLogStore, StorageEngine};
use sift_core::types::{NewQueryLogEntry, QueryOutput};

/// Outcome of one captured statement.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureResult {
    /// Id of the appended log entry; `None` for control statements.
    pub log_id: Option<i64>,
    pub execution_time_secs: f64,
    pub execution_plan: String,
    pub kind: StatementKind,
    pub output: QueryOutput,
}

/// Captures statements into a `QueryLogStore`.
#[derive(Debug, Clone)]
pub struct QueryCapture {
    explain_writes: bool,
}

impl Default for QueryCapture {
    fn default() -> Self {
        Self::from(&CaptureConfig::default())
    }
}

impl From<&CaptureConfig> for QueryCapture {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            explain_writes: config.effective_explain_writes(),
        }
    }
}

impl QueryCapture {
    pub fn new(explain_writes: bool) -> Self {
        Self { explain_writes }
    }

    /// Execute `query` and log it.
    ///
    /// Reads are planned first and then timed on a second run; the plan run
    /// warms caches, so the timed run is biased low. Writes run once and are
    /// planned only when the engine's explain has no side effects. Nothing is
    /// logged when a run fails.
    pub fn capture<E, L>(&self, engine: &E, store: &L, query: &str) -> Result<CaptureResult, CaptureError>
    where
        E: StorageEngine + ?Sized,
        L: QueryLogStore + ?Sized,
    {
        let kind = StatementKind::classify(query);

        if !kind.is_logged() {
            let output = engine.execute(query)?;
            tracing::debug!(query_len = query.len(), "executed control statement; not logged");
            return Ok(CaptureResult {
                log_id: None,
                execution_time_secs: 0.0,
                execution_plan: String::new(),
                kind,
                output,
            });
        }

        let plan = match kind {
            StatementKind::Read => engine.explain(query)?,
            _ if self.explain_writes && engine.explain_is_pure() => engine.explain(query)?,
            _ => String::new(),
        };

        let start = Instant::now();
        let output = engine.execute(query)?;
        let elapsed = start.elapsed().as_secs_f64();

        let entry = store.append(NewQueryLogEntry::now(query, elapsed, plan))?;
        tracing::info!(
            log_id = entry.id,
            kind = ?kind,
            elapsed_ms = elapsed * 1000.0,
            rows = output.rows.len(),
            "captured statement"
        );

        Ok(CaptureResult {
            log_id: Some(entry.id),
            execution_time_secs: entry.execution_time_secs,
            execution_plan: entry.execution_plan,
            kind,
            output,
        })
    }
}
