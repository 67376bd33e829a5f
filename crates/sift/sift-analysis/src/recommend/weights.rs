//! Scoring weights for index candidates.

use serde::{Deserialize, Serialize};
use sift_core::config::ScoringConfig;

/// Weights of the candidate score.
///
/// `base = frequency * count + cost * avg_secs`; composites multiply the base
/// by `1 + composite_factor * k` for `k` columns. The estimated impact is
/// `min(score * impact_multiplier, impact_cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub frequency: f64,
    pub cost: f64,
    pub composite_factor: f64,
    pub impact_multiplier: f64,
    pub impact_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

impl From<&ScoringConfig> for ScoringWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            frequency: config.effective_frequency_weight(),
            cost: config.effective_cost_weight(),
            composite_factor: config.effective_composite_factor(),
            impact_multiplier: config.effective_impact_multiplier(),
            impact_cap: config.effective_impact_cap(),
        }
    }
}

impl ScoringWeights {
    /// Unrounded score of a candidate.
    pub fn score(&self, occurrences: u32, avg_secs: f64, column_count: usize, composite: bool) -> f64 {
        let base = self.frequency * f64::from(occurrences) + self.cost * avg_secs;
        if composite {
            base * (1.0 + self.composite_factor * column_count as f64)
        } else {
            base
        }
    }

    /// Impact estimate for an unrounded score, clamped to `[0, impact_cap]`.
    /// A negative cap yields 0 and a NaN cap leaves the upper end open.
    pub fn impact(&self, score: f64) -> f64 {
        (score * self.impact_multiplier).min(self.impact_cap).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scoring_config() {
        let w = ScoringWeights::default();
        assert_eq!(w.frequency, 0.6);
        assert_eq!(w.cost, 4.0);
        assert_eq!(w.composite_factor, 0.2);
        assert_eq!(w.impact_multiplier, 5.0);
        assert_eq!(w.impact_cap, 95.0);
    }

    #[test]
    fn impact_tolerates_unvalidated_caps() {
        let negative = ScoringWeights { impact_cap: -5.0, ..ScoringWeights::default() };
        assert_eq!(negative.impact(10.0), 0.0);

        let nan = ScoringWeights { impact_cap: f64::NAN, ..ScoringWeights::default() };
        assert_eq!(nan.impact(2.0), 10.0);
        assert_eq!(nan.impact(-1.0), 0.0);
    }

    #[test]
    fn overrides_flow_from_config() {
        let config = ScoringConfig {
            cost_weight: Some(1.0),
            impact_cap: Some(50.0),
            ..Default::default()
        };
        let w = ScoringWeights::from(&config);
        assert_eq!(w.cost, 1.0);
        assert_eq!(w.impact(100.0), 50.0);
    }

    #[test]
    fn composite_multiplier_scales_with_width() {
        let w = ScoringWeights::default();
        let single = w.score(1, 0.5, 1, false);
        let pair = w.score(1, 0.5, 2, true);
        assert!((pair - single * 1.4).abs() < 1e-9);
    }
}
