//! Parsing of CREATE INDEX statements.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static RE_INDEX_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+(?:UNIQUE\s+)?INDEX\s+(?:IF\s+NOT\s+EXISTS\s+)?(\w+)\s+ON\b").ok()
});

static RE_INDEX_PARTS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^\s*CREATE\s+(UNIQUE\s+)?INDEX\s+(IF\s+NOT\s+EXISTS\s+)?(\w+)\s+ON\s+(\w+)\s*\((.*)\)\s*;?\s*$",
    )
    .ok()
});

/// Name of the index created by `statement`, if it is a CREATE INDEX.
///
/// The name must be a bare identifier followed by `ON`. Schema-qualified
/// and quoted names are not recognized. `CREATE INDEX ON t (...)` names no
/// index.
pub fn index_name(statement: &str) -> Option<String> {
    RE_INDEX_NAME
        .as_ref()?
        .captures(statement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.eq_ignore_ascii_case("ON"))
        .map(str::to_string)
}

/// A fully parsed `CREATE [UNIQUE] INDEX [IF NOT EXISTS] name ON table (cols)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatement {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: String,
    pub table: String,
    /// Key terms with surrounding whitespace removed.
    pub columns: Vec<String>,
}

impl IndexStatement {
    pub fn parse(statement: &str) -> Option<Self> {
        let caps = RE_INDEX_PARTS.as_ref()?.captures(statement)?;
        let columns: Vec<String> = split_terms(caps.get(5)?.as_str())
            .into_iter()
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        if columns.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            unique: caps.get(1).is_some(),
            if_not_exists: caps.get(2).is_some(),
            name: caps.get(3)?.as_str().to_string(),
            table: caps.get(4)?.as_str().to_string(),
            columns,
        })
    }
}

impl fmt::Display for IndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE ")?;
        if self.unique {
            write!(f, "UNIQUE ")?;
        }
        write!(f, "INDEX ")?;
        if self.if_not_exists {
            write!(f, "IF NOT EXISTS ")?;
        }
        write!(f, "{} ON {} ({})", self.name, self.table, self.columns.join(","))
    }
}

/// Split a column list on commas outside parentheses.
fn split_terms(list: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                terms.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(&list[start..]);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_unique_and_if_not_exists() {
        assert_eq!(index_name("CREATE INDEX idx_a ON t (a)").as_deref(), Some("idx_a"));
        assert_eq!(index_name("create unique index u1 on t(a)").as_deref(), Some("u1"));
        assert_eq!(
            index_name("CREATE INDEX IF NOT EXISTS idx_b ON t (b)").as_deref(),
            Some("idx_b")
        );
        assert_eq!(index_name("CREATE TABLE t (a)"), None);
        assert_eq!(index_name("DROP INDEX idx_a"), None);
    }

    #[test]
    fn name_is_absent_without_an_identifier() {
        assert_eq!(index_name("CREATE INDEX ON t (a)"), None);
        assert_eq!(index_name("CREATE TABLE t (a)"), None);
        assert_eq!(index_name("SELECT 1; CREATE INDEX i ON t (a)"), None);
        assert_eq!(index_name("CREATE INDEX main.idx_a ON t (a)"), None);
        assert_eq!(index_name("CREATE INDEX \"idx a\" ON t (a)"), None);
    }

    #[test]
    fn parse_normalizes_column_spacing() {
        let stmt = IndexStatement::parse("  CREATE INDEX idx_t_a_b ON t ( a ,  b );").unwrap();
        assert_eq!(stmt.columns, vec!["a", "b"]);
        assert_eq!(stmt.to_string(), "CREATE INDEX idx_t_a_b ON t (a,b)");
    }

    #[test]
    fn parse_keeps_unique_and_expression_terms() {
        let stmt = IndexStatement::parse("CREATE UNIQUE INDEX u ON t (lower(a, 'x'), b DESC)").unwrap();
        assert!(stmt.unique);
        assert_eq!(stmt.columns, vec!["lower(a, 'x')", "b DESC"]);
        assert_eq!(stmt.to_string(), "CREATE UNIQUE INDEX u ON t (lower(a, 'x'),b DESC)");
    }

    #[test]
    fn parse_rejects_empty_terms() {
        assert!(IndexStatement::parse("CREATE INDEX i ON t (a,,b)").is_none());
        assert!(IndexStatement::parse("CREATE INDEX i ON t ()").is_none());
    }
}
