//! Recommendation pass configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the recommendation pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most recent log entries considered. Default: 100.
    pub log_window: Option<usize>,
    /// Maximum candidates returned. Default: 10.
    pub recommendation_limit: Option<usize>,
    /// Candidates scoring below this are dropped. Default: 0.0 (keep all).
    pub min_score: Option<f64>,
    /// Plan substring marking a full scan. Default: "SCAN".
    pub scan_marker: Option<String>,
    /// Plan substring marking index use. Default: "INDEX".
    pub index_marker: Option<String>,
}

impl AnalysisConfig {
    pub fn effective_log_window(&self) -> usize {
        self.log_window.unwrap_or(100)
    }

    pub fn effective_recommendation_limit(&self) -> usize {
        self.recommendation_limit.unwrap_or(10)
    }

    pub fn effective_min_score(&self) -> f64 {
        self.min_score.unwrap_or(0.0)
    }

    pub fn effective_scan_marker(&self) -> &str {
        self.scan_marker.as_deref().unwrap_or("SCAN")
    }

    pub fn effective_index_marker(&self) -> &str {
        self.index_marker.as_deref().unwrap_or("INDEX")
    }
}
