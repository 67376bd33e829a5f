//! JSON reporter: the ranked list with derived display fields.

use serde_json::json;
use sift_core::types::IndexCandidate;

use super::Reporter;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, candidates: &[IndexCandidate]) -> Result<String, String> {
        let recommendations: Vec<serde_json::Value> = candidates
            .iter()
            .enumerate()
            .map(|(rank, c)| {
                json!({
                    "rank": rank + 1,
                    "table": c.table,
                    "columns": c.columns,
                    "column": c.column_display(),
                    "index_type": c.index_type(),
                    "is_composite": c.is_composite,
                    "occurrence_count": c.occurrence_count,
                    "avg_execution_time": c.avg_execution_time,
                    "total_execution_time": c.total_execution_time,
                    "score": c.score,
                    "estimated_impact": c.estimated_impact_percent,
                    "index_name": c.index_name,
                    "create_statement": c.create_statement,
                })
            })
            .collect();

        let report = json!({
            "count": candidates.len(),
            "recommendations": recommendations,
        });

        serde_json::to_string_pretty(&report).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
