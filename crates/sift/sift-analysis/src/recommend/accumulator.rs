//! Per-pass aggregation of candidate hits.

use sift_core::types::collections::{FxHashMap, SmallVec4};
use sift_core::types::IndexCandidate;

use super::weights::ScoringWeights;

#[derive(Debug, Clone)]
struct Tally {
    table: String,
    columns: SmallVec4<String>,
    composite: bool,
    occurrences: u32,
    total_secs: f64,
}

/// Running aggregates keyed by `(table, sorted columns)`, in first-seen order.
/// Created fresh for every recommendation pass.
#[derive(Debug, Default)]
pub struct CandidateAccumulator {
    tallies: Vec<Tally>,
    positions: FxHashMap<(String, bool, Vec<String>), usize>,
}

impl CandidateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit for `(table, column)`.
    pub fn add_single(&mut self, table: &str, column: &str, execution_secs: f64) {
        let mut columns = SmallVec4::new();
        columns.push(column.to_string());
        self.add(table, columns, false, execution_secs);
    }

    /// Record one hit for a composite over `columns`. Columns are sorted.
    pub fn add_composite(&mut self, table: &str, columns: &[String], execution_secs: f64) {
        let mut sorted: SmallVec4<String> = columns.iter().cloned().collect();
        sorted.sort();
        self.add(table, sorted, true, execution_secs);
    }

    fn add(&mut self, table: &str, columns: SmallVec4<String>, composite: bool, execution_secs: f64) {
        let key = (
            table.to_ascii_lowercase(),
            composite,
            columns.iter().map(|c| c.to_ascii_lowercase()).collect(),
        );
        let secs = execution_secs.max(0.0);
        match self.positions.get(&key) {
            Some(&at) => {
                let tally = &mut self.tallies[at];
                tally.occurrences += 1;
                tally.total_secs += secs;
            }
            None => {
                self.positions.insert(key, self.tallies.len());
                self.tallies.push(Tally {
                    table: table.to_string(),
                    columns,
                    composite,
                    occurrences: 1,
                    total_secs: secs,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Score every tally. Output keeps first-seen order.
    pub fn into_candidates(self, weights: &ScoringWeights) -> Vec<IndexCandidate> {
        self.tallies
            .into_iter()
            .map(|t| {
                let avg = t.total_secs / f64::from(t.occurrences);
                let raw = weights.score(t.occurrences, avg, t.columns.len(), t.composite);
                let index_name = format!("idx_{}_{}", t.table, t.columns.join("_"));
                let create_statement = format!(
                    "CREATE INDEX {} ON {} ({})",
                    index_name,
                    t.table,
                    t.columns.join(", ")
                );
                IndexCandidate {
                    table: t.table,
                    is_composite: t.composite,
                    occurrence_count: t.occurrences,
                    total_execution_time: t.total_secs,
                    avg_execution_time: avg,
                    score: round_to(raw, 2),
                    estimated_impact_percent: round_to(weights.impact(raw), 1),
                    index_name,
                    create_statement,
                    columns: t.columns,
                }
            })
            .collect()
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_hits_aggregate() {
        let mut acc = CandidateAccumulator::new();
        acc.add_single("users", "age", 0.2);
        acc.add_single("users", "age", 0.4);
        acc.add_single("users", "email", 0.1);
        assert_eq!(acc.len(), 2);

        let out = acc.into_candidates(&ScoringWeights::default());
        assert_eq!(out[0].occurrence_count, 2);
        assert!((out[0].total_execution_time - 0.6).abs() < 1e-9);
        assert!((out[0].avg_execution_time - 0.3).abs() < 1e-9);
        assert_eq!(out[1].columns.as_slice(), ["email".to_string()]);
    }

    #[test]
    fn composite_key_ignores_column_order() {
        let mut acc = CandidateAccumulator::new();
        acc.add_composite("t", &["b".into(), "a".into()], 0.1);
        acc.add_composite("t", &["a".into(), "b".into()], 0.1);
        let out = acc.into_candidates(&ScoringWeights::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index_name, "idx_t_a_b");
        assert_eq!(out[0].create_statement, "CREATE INDEX idx_t_a_b ON t (a, b)");
        assert_eq!(out[0].index_type(), "COMPOSITE");
    }

    #[test]
    fn single_and_composite_keys_never_collide() {
        let mut acc = CandidateAccumulator::new();
        acc.add_single("t", "a", 0.1);
        acc.add_composite("t", &["a".into()], 0.1);
        assert_eq!(acc.len(), 2);
    }
}
