//! CSV export of recommendations.

use sift_core::types::IndexCandidate;

use super::Reporter;

const HEADER: [&str; 7] = [
    "Table",
    "Column",
    "Score",
    "Index Type",
    "Index Name",
    "Create Statement",
    "Est. Impact",
];

pub struct CsvReporter;

impl Reporter for CsvReporter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn generate(&self, candidates: &[IndexCandidate]) -> Result<String, String> {
        let mut out = String::new();
        push_record(&mut out, HEADER.iter().map(|h| h.to_string()));
        for c in candidates {
            let index_type = match c.index_type() {
                "" => "Regular",
                other => other,
            };
            push_record(
                &mut out,
                [
                    c.table.clone(),
                    c.column_display(),
                    format!("{:.2}", c.score),
                    index_type.to_string(),
                    c.index_name.clone(),
                    c.create_statement.clone(),
                    format!("{:.1}%", c.estimated_impact_percent),
                ],
            );
        }
        Ok(out)
    }
}

fn push_record(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(escape("users"), "users");
        assert_eq!(escape("a, b"), "\"a, b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
