//! Recursive-descent shape extraction over the token stream.
//!
//! Only the clauses that can benefit from an index are read: FROM/JOIN,
//! JOIN ... ON/USING, WHERE, GROUP BY, HAVING and ORDER BY. Everything else is
//! skipped without complaint.

use sift_core::errors::ParseAmbiguity;

use super::tokenizer::{tokenize, Token};
use super::types::{ColumnRef, Shape, TableRef};

/// Keywords that open a top-level clause of a query.
const CLAUSE_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "OFFSET", "WINDOW",
    "RETURNING", "SET", "VALUES",
];

/// Keywords that end a compound member.
const COMPOUND_KEYWORDS: &[&str] = &["UNION", "INTERSECT", "EXCEPT"];

/// Words that may precede JOIN.
const JOIN_PREFIXES: &[&str] = &["INNER", "LEFT", "RIGHT", "FULL", "CROSS", "OUTER", "NATURAL"];

/// Words never taken as a table alias.
const NOT_ALIAS: &[&str] = &[
    "ON", "USING", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "CROSS", "OUTER", "NATURAL",
    "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "OFFSET", "WINDOW", "UNION", "INTERSECT",
    "EXCEPT", "INDEXED", "NOT", "SET", "RETURNING", "VALUES",
];

/// Words never taken as a column operand.
const NOT_OPERAND: &[&str] = &[
    "NOT", "NULL", "TRUE", "FALSE", "EXISTS", "CASE", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "SELECT",
];

const COMPARISON_OPS: &[&str] = &["=", "==", "<>", "!=", ">=", "<=", ">", "<"];

/// Extract the shape of `sql`.
pub fn extract(sql: &str) -> Shape {
    let tokens = tokenize(sql);
    let mut shape = Shape::default();

    if !parens_balanced(&tokens) {
        shape.push_ambiguity(ParseAmbiguity::UnbalancedParens);
    }

    let body = match tokens.iter().position(|t| matches!(t, Token::Semicolon)) {
        Some(end) => &tokens[..end],
        None => &tokens[..],
    };
    shape.merge(statement(body));

    if body.first().is_some_and(|t| t.is_kw("SELECT")) && shape.tables.is_empty() {
        shape.push_ambiguity(ParseAmbiguity::MissingFrom);
    }

    let unresolved: Vec<ParseAmbiguity> = match shape.tables.first() {
        Some(first) => shape
            .columns
            .iter()
            .filter_map(|c| c.qualifier.as_deref())
            .filter(|q| !shape.tables.iter().any(|t| t.answers_to(q)))
            .map(|q| ParseAmbiguity::UnresolvedQualifier {
                qualifier: q.to_string(),
                fallback: first.name.clone(),
            })
            .collect(),
        None => Vec::new(),
    };
    for ambiguity in unresolved {
        shape.push_ambiguity(ambiguity);
    }

    shape
}

fn parens_balanced(tokens: &[Token]) -> bool {
    let mut depth: i64 = 0;
    for t in tokens {
        match t {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Index of the parenthesis closing the one at `open`, or the slice end.
fn matching_paren(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(open) {
        match t {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Split `tokens` at depth-0 positions where `is_split` holds. Separator
/// tokens are dropped.
fn split_top_level<'a>(tokens: &'a [Token], is_split: impl Fn(&Token) -> bool) -> Vec<&'a [Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_split(t) => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

fn is_subquery_start(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.is_kw("SELECT") || t.is_kw("WITH") || t.is_kw("VALUES"))
}

/// One statement, possibly compound. Subqueries at any depth are folded in.
fn statement(tokens: &[Token]) -> Shape {
    let mut shape = Shape::default();

    let members = split_top_level(tokens, |t| COMPOUND_KEYWORDS.iter().any(|k| t.is_kw(k)));
    for member in members {
        let member = match member.first() {
            Some(t) if t.is_kw("ALL") || t.is_kw("DISTINCT") => &member[1..],
            _ => member,
        };
        shape.merge(simple_statement(member));
    }

    for sub in subqueries(tokens) {
        let mut inner = statement(sub);
        qualify_bare_columns(&mut inner);
        shape.merge(inner);
    }
    shape
}

/// Bare columns of a subquery belong to the subquery's own first table.
fn qualify_bare_columns(shape: &mut Shape) {
    let Some(first) = shape.tables.first() else {
        return;
    };
    let qualifier = first.alias.clone().unwrap_or_else(|| first.name.clone());
    for column in shape.columns.iter_mut().filter(|c| c.qualifier.is_none()) {
        column.qualifier = Some(qualifier.clone());
    }
}

/// Bodies of the outermost parenthesized sub-statements in `tokens`.
fn subqueries(tokens: &[Token]) -> Vec<&[Token]> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if matches!(tokens[i], Token::LParen) && is_subquery_start(tokens.get(i + 1)) {
            let close = matching_paren(tokens, i);
            found.push(&tokens[i + 1..close.min(tokens.len())]);
            i = close + 1;
        } else {
            i += 1;
        }
    }
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Lead,
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Other,
}

fn clause_for(tokens: &[Token], i: usize) -> Option<(Clause, usize)> {
    let t = &tokens[i];
    let followed_by_by = tokens.get(i + 1).is_some_and(|n| n.is_kw("BY"));
    let clause = if t.is_kw("SELECT") {
        (Clause::Select, 1)
    } else if t.is_kw("FROM") {
        (Clause::From, 1)
    } else if t.is_kw("WHERE") {
        (Clause::Where, 1)
    } else if t.is_kw("GROUP") && followed_by_by {
        (Clause::GroupBy, 2)
    } else if t.is_kw("HAVING") {
        (Clause::Having, 1)
    } else if t.is_kw("ORDER") && followed_by_by {
        (Clause::OrderBy, 2)
    } else if CLAUSE_KEYWORDS.iter().any(|k| t.is_kw(k)) {
        (Clause::Other, 1)
    } else {
        return None;
    };
    Some(clause)
}

/// Locate depth-0 clause boundaries and dispatch each clause body.
fn simple_statement(tokens: &[Token]) -> Shape {
    let mut shape = Shape::default();
    let mut clauses: Vec<(Clause, usize, usize)> = Vec::new();
    let mut current = (Clause::Lead, 0usize);
    let mut depth = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                if let Some((clause, width)) = clause_for(tokens, i) {
                    clauses.push((current.0, current.1, i));
                    current = (clause, i + width);
                    i += width;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    clauses.push((current.0, current.1, tokens.len()));

    for (clause, start, end) in clauses {
        let body = &tokens[start.min(end)..end];
        match clause {
            Clause::Lead => lead(body, &mut shape),
            Clause::From => from_clause(body, &mut shape),
            Clause::Where | Clause::Having => conditions(body, &mut shape),
            Clause::GroupBy | Clause::OrderBy => ordering_terms(body, &mut shape),
            Clause::Select | Clause::Other => {}
        }
    }
    shape
}

/// Text before the first clause keyword: the target of UPDATE, or of
/// DELETE when written without FROM.
fn lead(tokens: &[Token], shape: &mut Shape) {
    let mut cursor = Cursor::new(tokens);
    if cursor.eat_kw("UPDATE") {
        while cursor.eat_kw("OR") {
            cursor.bump();
        }
        table_item(&mut cursor, shape);
    }
}

/// FROM body: comma- and JOIN-separated table references with their
/// ON/USING conditions.
fn from_clause(tokens: &[Token], shape: &mut Shape) {
    let mut cursor = Cursor::new(tokens);
    while !cursor.is_eof() {
        table_item(&mut cursor, shape);
        loop {
            match cursor.peek() {
                None => break,
                Some(Token::Comma) => {
                    cursor.bump();
                    break;
                }
                Some(t) if t.is_kw("JOIN") || is_join_prefix(t) => {
                    while cursor.peek().is_some_and(is_join_prefix) {
                        cursor.bump();
                    }
                    cursor.eat_kw("JOIN");
                    break;
                }
                Some(_) => cursor.skip_item(),
            }
        }
    }
}

fn is_join_prefix(t: &Token) -> bool {
    JOIN_PREFIXES.iter().any(|k| t.is_kw(k))
}

fn is_join_boundary(t: &Token) -> bool {
    matches!(t, Token::Comma) || t.is_kw("JOIN") || is_join_prefix(t)
}

/// One table reference with optional alias and join constraint.
fn table_item(cursor: &mut Cursor<'_>, shape: &mut Shape) {
    let mut registered: Option<TableRef> = None;
    match cursor.peek() {
        Some(Token::LParen) => {
            let inner = cursor.take_group();
            // Parenthesized join list; derived tables are read as subqueries.
            if !is_subquery_start(inner.first()) {
                from_clause(inner, shape);
            }
            parse_alias(cursor);
        }
        Some(t) if is_identifier(t) => {
            let mut name = cursor.bump_ident().unwrap_or_default();
            while matches!(cursor.peek(), Some(Token::Dot)) && cursor.peek_at(1).is_some_and(is_identifier) {
                cursor.bump();
                name = cursor.bump_ident().unwrap_or_default();
            }
            if matches!(cursor.peek(), Some(Token::LParen)) {
                // Table-valued function.
                cursor.take_group();
                parse_alias(cursor);
            } else {
                let table = TableRef {
                    name,
                    alias: parse_alias(cursor),
                };
                shape.push_table(table.clone());
                registered = Some(table);
            }
        }
        _ => return,
    }

    while cursor.eat_kw("INDEXED") || cursor.eat_kw("NOT") {
        cursor.eat_kw("BY");
        cursor.eat_kw("INDEXED");
        if cursor.peek().is_some_and(is_identifier) {
            cursor.bump();
        }
    }

    if cursor.eat_kw("ON") {
        let body = cursor.take_until(is_join_boundary);
        conditions(body, shape);
    } else if cursor.eat_kw("USING") && matches!(cursor.peek(), Some(Token::LParen)) {
        let inner = cursor.take_group();
        for t in inner.iter().filter(|t| is_identifier(t)) {
            if let Some(name) = t.ident() {
                let column = match &registered {
                    Some(table) => ColumnRef::qualified(
                        table.alias.clone().unwrap_or_else(|| table.name.clone()),
                        name,
                    ),
                    None => ColumnRef::bare(name),
                };
                shape.push_column(column);
            }
        }
    }
}

fn parse_alias(cursor: &mut Cursor<'_>) -> Option<String> {
    let explicit = cursor.eat_kw("AS");
    match cursor.peek() {
        Some(Token::Quoted(q)) => {
            let alias = q.clone();
            cursor.bump();
            Some(alias)
        }
        Some(Token::Word(w)) if explicit || !NOT_ALIAS.iter().any(|k| w.eq_ignore_ascii_case(k)) => {
            let alias = w.clone();
            cursor.bump();
            Some(alias)
        }
        _ => None,
    }
}

fn is_identifier(t: &Token) -> bool {
    match t {
        Token::Quoted(_) => true,
        Token::Word(w) => !NOT_ALIAS.iter().any(|k| w.eq_ignore_ascii_case(k)),
        _ => false,
    }
}

/// Boolean condition list: split on depth-0 AND/OR and read each fragment.
fn conditions(tokens: &[Token], shape: &mut Shape) {
    for fragment in split_conditions(tokens) {
        condition(fragment, shape);
    }
}

fn split_conditions(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut open_between = false;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            _ if t.is_kw("BETWEEN") => open_between = true,
            _ if t.is_kw("AND") && open_between => open_between = false,
            _ if t.is_kw("AND") || t.is_kw("OR") => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

fn condition(fragment: &[Token], shape: &mut Shape) {
    let mut fragment = fragment;
    while fragment.first().is_some_and(|t| t.is_kw("NOT")) {
        fragment = &fragment[1..];
    }
    if fragment.is_empty() {
        return;
    }

    if matches!(fragment[0], Token::LParen) {
        let close = matching_paren(fragment, 0);
        if close + 1 == fragment.len() && !is_subquery_start(fragment.get(1)) {
            conditions(&fragment[1..close], shape);
        }
        return;
    }

    let mut cursor = Cursor::new(fragment);
    let Some(column) = column_operand(&mut cursor) else {
        return;
    };
    if is_predicate(&mut cursor) {
        shape.push_column(column);
    }
}

/// A bare or qualified identifier that is not followed by a call.
fn column_operand(cursor: &mut Cursor<'_>) -> Option<ColumnRef> {
    let first = cursor.peek()?;
    if let Token::Word(w) = first {
        if NOT_OPERAND.iter().any(|k| w.eq_ignore_ascii_case(k)) {
            return None;
        }
    }
    let first = cursor.bump_ident()?;
    let column = if matches!(cursor.peek(), Some(Token::Dot)) {
        cursor.bump();
        let name = cursor.bump_ident()?;
        ColumnRef::qualified(first, name)
    } else {
        ColumnRef::bare(first)
    };
    if matches!(cursor.peek(), Some(Token::LParen | Token::Dot)) {
        return None;
    }
    Some(column)
}

fn is_predicate(cursor: &mut Cursor<'_>) -> bool {
    match cursor.peek() {
        Some(Token::Op(op)) => COMPARISON_OPS.contains(op),
        Some(t) if t.is_kw("IN") || t.is_kw("BETWEEN") || t.is_kw("LIKE") => true,
        Some(t) if t.is_kw("IS") => {
            cursor.bump();
            cursor.eat_kw("NOT");
            cursor.peek().is_some_and(|t| t.is_kw("NULL"))
        }
        Some(t) if t.is_kw("NOT") => {
            cursor.bump();
            cursor
                .peek()
                .is_some_and(|t| t.is_kw("IN") || t.is_kw("BETWEEN") || t.is_kw("LIKE"))
        }
        _ => false,
    }
}

/// ORDER BY / GROUP BY terms. Only plain column terms count.
fn ordering_terms(tokens: &[Token], shape: &mut Shape) {
    for term in split_top_level(tokens, |t| matches!(t, Token::Comma)) {
        let mut cursor = Cursor::new(term);
        let Some(column) = column_operand(&mut cursor) else {
            continue;
        };
        let trailing_ok = cursor.is_eof()
            || ((cursor.eat_kw("ASC") || cursor.eat_kw("DESC") || cursor.eat_kw("COLLATE"))
                && cursor.rest().iter().all(is_identifier));
        if trailing_ok {
            shape.push_column(column);
        }
    }
}

/// Forward-only view over a token slice.
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn rest(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat_kw(&mut self, kw: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_kw(kw)) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn bump_ident(&mut self) -> Option<String> {
        let name = self.peek()?.ident()?.to_string();
        self.bump();
        Some(name)
    }

    /// Consume a parenthesized group and return its interior.
    fn take_group(&mut self) -> &'a [Token] {
        let close = matching_paren(self.tokens, self.pos);
        let inner = &self.tokens[(self.pos + 1).min(close)..close];
        self.pos = close + 1;
        inner
    }

    /// Consume tokens up to the first depth-0 token matching `stop`.
    fn take_until(&mut self, stop: impl Fn(&Token) -> bool) -> &'a [Token] {
        let start = self.pos;
        while let Some(t) = self.peek() {
            if matches!(t, Token::LParen) {
                self.take_group();
                continue;
            }
            if stop(t) {
                break;
            }
            self.bump();
        }
        &self.tokens[start..self.pos.min(self.tokens.len())]
    }

    /// Skip one token, or a whole parenthesized group.
    fn skip_item(&mut self) {
        if matches!(self.peek(), Some(Token::LParen)) {
            self.take_group();
        } else {
            self.bump();
        }
    }
}
