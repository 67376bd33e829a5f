//! Before/after timing comparison produced by the validator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComparisonResult {
    pub original_time_ms: f64,
    pub optimized_time_ms: f64,
    pub improvement_percent: f64,
    pub success: bool,
    pub error_message: Option<String>,
    /// Set when dropping the transient index failed. Never changes `success`.
    pub cleanup_warning: Option<String>,
}

impl ComparisonResult {
    /// Build a successful result from timings in seconds.
    pub fn measured(original_secs: f64, optimized_secs: f64) -> Self {
        let improvement = if original_secs > 0.0 {
            (original_secs - optimized_secs) / original_secs * 100.0
        } else {
            0.0
        };
        Self {
            original_time_ms: round2(original_secs * 1000.0),
            optimized_time_ms: round2(optimized_secs * 1000.0),
            improvement_percent: round2(improvement),
            success: true,
            error_message: None,
            cleanup_warning: None,
        }
    }

    /// Build a failed result carrying the re-measurement error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_is_relative_to_original() {
        let r = ComparisonResult::measured(0.2, 0.05);
        assert!(r.success);
        assert_eq!(r.original_time_ms, 200.0);
        assert_eq!(r.optimized_time_ms, 50.0);
        assert_eq!(r.improvement_percent, 75.0);
    }

    #[test]
    fn zero_original_time_yields_zero_improvement() {
        let r = ComparisonResult::measured(0.0, 0.01);
        assert_eq!(r.improvement_percent, 0.0);
    }

    #[test]
    fn regression_is_negative() {
        let r = ComparisonResult::measured(0.1, 0.2);
        assert_eq!(r.improvement_percent, -100.0);
    }
}
