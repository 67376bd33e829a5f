//! Ranked index candidates produced by a recommendation pass.

use serde::{Deserialize, Serialize};

use super::collections::SmallVec4;

/// A proposed index on `(table, columns)`.
///
/// Unique per recommendation pass by `(table, sorted columns)`; recomputed
/// from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexCandidate {
    pub table: String,
    /// Non-empty. Composite candidates hold their columns in sorted order.
    pub columns: SmallVec4<String>,
    pub is_composite: bool,
    pub occurrence_count: u32,
    /// Sum of execution times (seconds) of contributing statements.
    pub total_execution_time: f64,
    /// `total_execution_time / occurrence_count`.
    pub avg_execution_time: f64,
    pub score: f64,
    /// Heuristic proxy in `[0, 95]` by default; not a measured value.
    pub estimated_impact_percent: f64,
    pub index_name: String,
    pub create_statement: String,
}

impl IndexCandidate {
    /// Columns joined with ", " for display.
    pub fn column_display(&self) -> String {
        self.columns.join(", ")
    }

    /// "COMPOSITE" for multi-column candidates, empty for single-column ones.
    pub fn index_type(&self) -> &'static str {
        if self.is_composite {
            "COMPOSITE"
        } else {
            ""
        }
    }
}
