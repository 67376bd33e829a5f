//! Extracted statement shape.

use serde::{Deserialize, Serialize};
use sift_core::errors::ParseAmbiguity;

/// A table named in FROM/JOIN (or the target of UPDATE/DELETE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    /// True when `qualifier` names this table by name or alias.
    pub fn answers_to(&self, qualifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(qualifier)
            || self
                .alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(qualifier))
    }
}

/// A column reference in an indexable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

/// Tables and indexable columns of one statement, subqueries included.
/// Both lists are deduplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub tables: Vec<TableRef>,
    pub columns: Vec<ColumnRef>,
    pub ambiguities: Vec<ParseAmbiguity>,
}

impl Shape {
    /// Attribute `column` to a table.
    ///
    /// Unqualified columns belong to the first table. Qualified columns
    /// belong to the table whose name or alias matches; when none does, the
    /// first table is used and the second element is `true`.
    pub fn resolve(&self, column: &ColumnRef) -> Option<(&TableRef, bool)> {
        let first = self.tables.first()?;
        match column.qualifier.as_deref() {
            None => Some((first, false)),
            Some(q) => match self.tables.iter().find(|t| t.answers_to(q)) {
                Some(table) => Some((table, false)),
                None => Some((first, true)),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub(crate) fn push_table(&mut self, table: TableRef) {
        if !self.tables.contains(&table) {
            self.tables.push(table);
        }
    }

    pub(crate) fn push_column(&mut self, column: ColumnRef) {
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    pub(crate) fn push_ambiguity(&mut self, ambiguity: ParseAmbiguity) {
        if !self.ambiguities.contains(&ambiguity) {
            self.ambiguities.push(ambiguity);
        }
    }

    /// Fold another shape in, keeping first-seen order.
    pub(crate) fn merge(&mut self, other: Shape) {
        for t in other.tables {
            self.push_table(t);
        }
        for c in other.columns {
            self.push_column(c);
        }
        for a in other.ambiguities {
            self.push_ambiguity(a);
        }
    }
}
