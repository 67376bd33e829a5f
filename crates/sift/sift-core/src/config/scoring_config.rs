//! Candidate scoring weights.

use serde::{Deserialize, Serialize};

/// Empirical weights of the scoring formula
/// `base = frequency_weight * count + cost_weight * avg_secs`,
/// composites multiplied by `1 + composite_factor * k`,
/// impact `min(score * impact_multiplier, impact_cap)`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Default: 0.6.
    pub frequency_weight: Option<f64>,
    /// Default: 4.0.
    pub cost_weight: Option<f64>,
    /// Default: 0.2.
    pub composite_factor: Option<f64>,
    /// Default: 5.0.
    pub impact_multiplier: Option<f64>,
    /// Default: 95.0.
    pub impact_cap: Option<f64>,
}

impl ScoringConfig {
    pub fn effective_frequency_weight(&self) -> f64 {
        self.frequency_weight.unwrap_or(0.6)
    }

    pub fn effective_cost_weight(&self) -> f64 {
        self.cost_weight.unwrap_or(4.0)
    }

    pub fn effective_composite_factor(&self) -> f64 {
        self.composite_factor.unwrap_or(0.2)
    }

    pub fn effective_impact_multiplier(&self) -> f64 {
        self.impact_multiplier.unwrap_or(5.0)
    }

    pub fn effective_impact_cap(&self) -> f64 {
        self.impact_cap.unwrap_or(95.0)
    }
}
