//! Reporters: output formats for ranked index candidates.

pub mod csv;
pub mod json;

use sift_core::types::IndexCandidate;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, candidates: &[IndexCandidate]) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "csv" => Some(Box::new(csv::CsvReporter)),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["csv", "json"]
}

/// Render `candidates` in `format`.
pub fn render(format: &str, candidates: &[IndexCandidate]) -> Result<String, String> {
    let reporter = create_reporter(format).ok_or_else(|| {
        format!(
            "unknown report format '{format}' (expected one of: {})",
            available_formats().join(", ")
        )
    })?;
    reporter.generate(candidates)
}
