//! Candidate scoring and ranking over a window of captured statements.

pub mod accumulator;
pub mod snapshot;
pub mod weights;

pub use accumulator::CandidateAccumulator;
pub use snapshot::IndexSnapshot;
pub use weights::ScoringWeights;

use sift_core::config::SiftConfig;
use sift_core::types::{IndexCandidate, QueryLogEntry};

use crate::capture::statement::starts_with_keyword;
use crate::shape::{self, Shape};

/// Plan markers and thresholds applied before scoring.
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub weights: ScoringWeights,
    /// Plan text containing this marker indicates a full scan.
    pub scan_marker: String,
    /// Plan text containing this marker indicates index use.
    pub index_marker: String,
    /// Candidates scoring below this are dropped.
    pub min_score: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::from(&SiftConfig::default())
    }
}

impl From<&SiftConfig> for RecommenderConfig {
    fn from(config: &SiftConfig) -> Self {
        Self {
            weights: ScoringWeights::from(&config.scoring),
            scan_marker: config.analysis.effective_scan_marker().to_string(),
            index_marker: config.analysis.effective_index_marker().to_string(),
            min_score: config.analysis.effective_min_score(),
        }
    }
}

/// Turns a log window into ranked index candidates.
pub struct Recommender {
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RecommenderConfig::default())
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// True when `entry` is a SELECT whose plan shows a scan without index use.
    pub fn qualifies(&self, entry: &QueryLogEntry) -> bool {
        starts_with_keyword(&entry.query_text, "SELECT")
            && entry.execution_plan.contains(&self.config.scan_marker)
            && !entry.execution_plan.contains(&self.config.index_marker)
    }

    /// Tables referenced by qualifying entries, in first-seen order. These
    /// are the tables an `IndexSnapshot` must cover.
    pub fn referenced_tables(&self, window: &[QueryLogEntry]) -> Vec<String> {
        let mut tables: Vec<String> = Vec::new();
        for entry in window.iter().filter(|e| self.qualifies(e)) {
            for table in shape::extract(&entry.query_text).tables {
                if !tables.iter().any(|t| t.eq_ignore_ascii_case(&table.name)) {
                    tables.push(table.name);
                }
            }
        }
        tables
    }

    /// Rank candidates for `window`. Pure: identical inputs give identical
    /// output.
    pub fn recommend(
        &self,
        window: &[QueryLogEntry],
        indexed: &IndexSnapshot,
        limit: usize,
    ) -> Vec<IndexCandidate> {
        let mut acc = CandidateAccumulator::new();
        let mut considered = 0usize;

        for entry in window.iter().filter(|e| self.qualifies(e)) {
            let shape = shape::extract(&entry.query_text);
            if shape.is_empty() {
                continue;
            }
            considered += 1;
            for ambiguity in &shape.ambiguities {
                tracing::debug!(log_id = entry.id, %ambiguity, "shape ambiguity");
            }
            accumulate(&shape, indexed, entry.execution_time_secs, &mut acc);
        }

        let mut candidates = acc.into_candidates(&self.config.weights);
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.retain(|c| c.score >= self.config.min_score);
        candidates.truncate(limit);

        tracing::debug!(
            window = window.len(),
            considered,
            candidates = candidates.len(),
            "recommendation pass"
        );
        candidates
    }
}

/// Single-column hits for unindexed columns, plus one composite per table
/// hit by two or more distinct columns. Each (table, column) counts once per
/// statement.
fn accumulate(shape: &Shape, indexed: &IndexSnapshot, secs: f64, acc: &mut CandidateAccumulator) {
    let mut per_table: Vec<(&str, Vec<String>)> = Vec::new();

    for column in &shape.columns {
        let Some((table, _ambiguous)) = shape.resolve(column) else {
            continue;
        };
        let slot = match per_table
            .iter()
            .position(|(t, _)| t.eq_ignore_ascii_case(&table.name))
        {
            Some(at) => at,
            None => {
                per_table.push((table.name.as_str(), Vec::new()));
                per_table.len() - 1
            }
        };
        let cols = &mut per_table[slot].1;
        if cols.iter().any(|c| c.eq_ignore_ascii_case(&column.name)) {
            continue;
        }
        cols.push(column.name.clone());

        if !indexed.is_indexed(&table.name, &column.name) {
            acc.add_single(&table.name, &column.name, secs);
        }
    }

    for (table, columns) in per_table {
        if columns.len() >= 2 {
            acc.add_composite(table, &columns, secs);
        }
    }
}
