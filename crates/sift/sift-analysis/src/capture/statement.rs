//! Statement classification by leading keyword.

use serde::{Deserialize, Serialize};

/// How capture treats a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// EXPLAIN or PRAGMA: executed, never logged.
    Control,
    /// SELECT, WITH or VALUES: planned, then timed.
    Read,
    /// Everything else: executed exactly once.
    Write,
}

impl StatementKind {
    pub fn classify(sql: &str) -> Self {
        match leading_keyword(sql) {
            Some(kw) if kw.eq_ignore_ascii_case("EXPLAIN") || kw.eq_ignore_ascii_case("PRAGMA") => {
                Self::Control
            }
            Some(kw)
                if kw.eq_ignore_ascii_case("SELECT")
                    || kw.eq_ignore_ascii_case("WITH")
                    || kw.eq_ignore_ascii_case("VALUES") =>
            {
                Self::Read
            }
            _ => Self::Write,
        }
    }

    pub fn is_logged(self) -> bool {
        self != Self::Control
    }
}

/// First word of `sql` after leading whitespace.
pub fn leading_keyword(sql: &str) -> Option<&str> {
    let trimmed = sql.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    (end > 0).then(|| &trimmed[..end])
}

/// True when the first word of `sql` is `keyword`, ignoring case.
pub fn starts_with_keyword(sql: &str, keyword: &str) -> bool {
    leading_keyword(sql).is_some_and(|kw| kw.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_leading_keyword() {
        assert_eq!(StatementKind::classify("  explain query plan select 1"), StatementKind::Control);
        assert_eq!(StatementKind::classify("PRAGMA table_info(users)"), StatementKind::Control);
        assert_eq!(StatementKind::classify("\n\tselect * from t"), StatementKind::Read);
        assert_eq!(StatementKind::classify("WITH x AS (SELECT 1) SELECT * FROM x"), StatementKind::Read);
        assert_eq!(StatementKind::classify("INSERT INTO t VALUES (1)"), StatementKind::Write);
        assert_eq!(StatementKind::classify(""), StatementKind::Write);
    }

    #[test]
    fn only_control_statements_skip_the_log() {
        assert!(!StatementKind::Control.is_logged());
        assert!(StatementKind::Read.is_logged());
        assert!(StatementKind::Write.is_logged());
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        assert!(starts_with_keyword("select*from t", "SELECT"));
        assert!(!starts_with_keyword("selection", "SELECT"));
        assert!(!starts_with_keyword("  ", "SELECT"));
    }
}
