//! Shape extraction across the supported clause set.

use sift_analysis::shape::{extract, ColumnRef, Shape, TableRef};
use sift_core::errors::ParseAmbiguity;

fn table_names(shape: &Shape) -> Vec<&str> {
    shape.tables.iter().map(|t| t.name.as_str()).collect()
}

fn column_names(shape: &Shape) -> Vec<String> {
    shape
        .columns
        .iter()
        .map(|c| match &c.qualifier {
            Some(q) => format!("{q}.{}", c.name),
            None => c.name.clone(),
        })
        .collect()
}

#[test]
fn simple_where_equality() {
    let shape = extract("SELECT * FROM products WHERE category = 'Electronics'");
    assert_eq!(
        shape.tables,
        vec![TableRef {
            name: "products".into(),
            alias: None
        }]
    );
    assert_eq!(shape.columns, vec![ColumnRef::bare("category")]);
    assert!(shape.ambiguities.is_empty());
}

#[test]
fn aliases_with_and_without_as() {
    let shape = extract("SELECT * FROM users AS u, orders o WHERE u.id = 1 AND o.total > 10");
    assert_eq!(shape.tables[0].alias.as_deref(), Some("u"));
    assert_eq!(shape.tables[1].alias.as_deref(), Some("o"));
    assert_eq!(column_names(&shape), vec!["u.id", "o.total"]);

    let (table, ambiguous) = shape.resolve(&shape.columns[1]).unwrap();
    assert_eq!(table.name, "orders");
    assert!(!ambiguous);
}

#[test]
fn join_on_contributes_left_operand() {
    let shape = extract(
        "SELECT u.username, COUNT(o.order_id) FROM users u \
         LEFT OUTER JOIN orders o ON u.user_id = o.user_id GROUP BY u.username",
    );
    assert_eq!(table_names(&shape), vec!["users", "orders"]);
    assert_eq!(column_names(&shape), vec!["u.user_id", "u.username"]);
}

#[test]
fn every_join_flavor_splits_tables() {
    for join in ["JOIN", "INNER JOIN", "LEFT JOIN", "RIGHT JOIN", "FULL JOIN", "CROSS JOIN"] {
        let sql = format!("SELECT * FROM a x {join} b y ON x.k = y.k");
        let shape = extract(&sql);
        assert_eq!(table_names(&shape), vec!["a", "b"], "{join}");
        assert_eq!(shape.tables[1].alias.as_deref(), Some("y"), "{join}");
    }
}

#[test]
fn join_using_qualifies_with_joined_table() {
    let shape = extract("SELECT * FROM orders o JOIN items i USING (order_id)");
    assert_eq!(column_names(&shape), vec!["i.order_id"]);
}

#[test]
fn between_and_is_not_a_condition_split() {
    let shape = extract("SELECT * FROM t WHERE price BETWEEN 10 AND 20 AND stock < 5");
    assert_eq!(column_names(&shape), vec!["price", "stock"]);
}

#[test]
fn negated_and_null_predicates() {
    let shape = extract(
        "SELECT * FROM t WHERE a NOT IN (1, 2) AND b NOT LIKE 'x%' \
         AND c NOT BETWEEN 1 AND 3 AND d IS NULL OR e IS NOT NULL",
    );
    assert_eq!(column_names(&shape), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn every_comparison_operator() {
    let shape = extract(
        "SELECT * FROM t WHERE a = 1 AND b <> 1 AND c != 1 AND d >= 1 \
         AND e <= 1 AND f > 1 AND g < 1 AND h LIKE 'x' AND i IN (1)",
    );
    assert_eq!(
        column_names(&shape),
        vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]
    );
}

#[test]
fn literals_and_calls_on_the_left_are_ignored() {
    let shape = extract("SELECT * FROM t WHERE 1 = a AND upper(b) = 'X' AND 'k' = c");
    assert!(shape.columns.is_empty());
}

#[test]
fn parenthesized_conditions_are_descended() {
    let shape = extract("SELECT * FROM t WHERE (a = 1 OR (b = 2 AND c > 3)) AND NOT d = 4");
    assert_eq!(column_names(&shape), vec!["a", "b", "c", "d"]);
}

#[test]
fn order_by_and_group_by_terms() {
    let shape = extract(
        "SELECT city, COUNT(*) FROM users WHERE age > 18 \
         GROUP BY city HAVING COUNT(*) > 2 ORDER BY city DESC, name ASC LIMIT 5",
    );
    assert_eq!(column_names(&shape), vec!["age", "city", "name"]);
}

#[test]
fn having_with_plain_column() {
    let shape = extract("SELECT dept FROM emp GROUP BY dept HAVING dept <> 'x'");
    assert_eq!(column_names(&shape), vec!["dept"]);
}

#[test]
fn subquery_tables_and_columns_are_merged() {
    let shape = extract(
        "SELECT * FROM orders WHERE user_id IN \
         (SELECT id FROM users WHERE country = 'NZ')",
    );
    assert_eq!(table_names(&shape), vec!["orders", "users"]);
    assert_eq!(column_names(&shape), vec!["user_id", "users.country"]);

    let (table, _) = shape.resolve(&shape.columns[1]).unwrap();
    assert_eq!(table.name, "users");
}

#[test]
fn nested_subqueries_recurse() {
    let shape = extract(
        "SELECT * FROM a WHERE x IN (SELECT y FROM b WHERE z IN (SELECT w FROM c WHERE v = 1))",
    );
    assert_eq!(table_names(&shape), vec!["a", "b", "c"]);
    assert!(column_names(&shape).contains(&"c.v".to_string()));
}

#[test]
fn derived_table_is_read_as_subquery() {
    let shape = extract("SELECT * FROM (SELECT * FROM logs WHERE level = 'error') recent");
    assert_eq!(table_names(&shape), vec!["logs"]);
    assert_eq!(column_names(&shape), vec!["logs.level"]);
}

#[test]
fn unresolved_qualifier_falls_back_to_first_table() {
    let shape = extract("SELECT * FROM users u JOIN orders o ON u.id = o.user_id WHERE z.flag = 1");
    let column = shape.columns.iter().find(|c| c.name == "flag").unwrap();
    let (table, ambiguous) = shape.resolve(column).unwrap();
    assert_eq!(table.name, "users");
    assert!(ambiguous);
    assert_eq!(
        shape.ambiguities,
        vec![ParseAmbiguity::UnresolvedQualifier {
            qualifier: "z".into(),
            fallback: "users".into(),
        }]
    );
}

#[test]
fn unqualified_columns_belong_to_first_table() {
    let shape = extract("SELECT * FROM a, b WHERE k = 1");
    let (table, ambiguous) = shape.resolve(&shape.columns[0]).unwrap();
    assert_eq!(table.name, "a");
    assert!(!ambiguous);
}

#[test]
fn qualifier_may_be_the_table_name() {
    let shape = extract("SELECT * FROM users WHERE users.email = 'x'");
    let (table, ambiguous) = shape.resolve(&shape.columns[0]).unwrap();
    assert_eq!(table.name, "users");
    assert!(!ambiguous);
}

#[test]
fn duplicates_keep_first_seen_order() {
    let shape = extract("SELECT * FROM t WHERE b = 1 AND a = 2 AND b = 3 ORDER BY a");
    assert_eq!(column_names(&shape), vec!["b", "a"]);
}

#[test]
fn keywords_are_case_insensitive() {
    let shape = extract("select * from Users u where u.Age >= 21 order by u.Name");
    assert_eq!(table_names(&shape), vec!["Users"]);
    assert_eq!(column_names(&shape), vec!["u.Age", "u.Name"]);
}

#[test]
fn quoted_identifiers_and_comments() {
    let shape = extract(
        "SELECT * /* all */ FROM \"order items\" oi -- trailing\n WHERE oi.\"unit price\" > 3",
    );
    assert_eq!(table_names(&shape), vec!["order items"]);
    assert_eq!(column_names(&shape), vec!["oi.unit price"]);
}

#[test]
fn schema_qualified_table_uses_table_part() {
    let shape = extract("SELECT * FROM main.users WHERE id = 1");
    assert_eq!(table_names(&shape), vec!["users"]);
}

#[test]
fn union_members_are_both_read() {
    let shape = extract("SELECT id FROM a WHERE x = 1 UNION ALL SELECT id FROM b WHERE y = 2");
    assert_eq!(table_names(&shape), vec!["a", "b"]);
    assert_eq!(column_names(&shape), vec!["x", "y"]);
}

#[test]
fn update_and_delete_targets() {
    let update = extract("UPDATE users SET active = 0 WHERE last_login < 100");
    assert_eq!(table_names(&update), vec!["users"]);
    assert_eq!(column_names(&update), vec!["last_login"]);

    let delete = extract("DELETE FROM sessions WHERE expires_at < 5");
    assert_eq!(table_names(&delete), vec!["sessions"]);
    assert_eq!(column_names(&delete), vec!["expires_at"]);
}

#[test]
fn missing_from_and_unbalanced_parens_are_recorded() {
    let no_from = extract("SELECT 1");
    assert!(no_from.tables.is_empty());
    assert!(no_from.ambiguities.contains(&ParseAmbiguity::MissingFrom));

    let broken = extract("SELECT * FROM t WHERE (a = 1");
    assert!(broken.ambiguities.contains(&ParseAmbiguity::UnbalancedParens));
    assert_eq!(table_names(&broken), vec!["t"]);
}

#[test]
fn trailing_semicolon_and_second_statement_ignored() {
    let shape = extract("SELECT * FROM t WHERE a = 1; SELECT * FROM u WHERE b = 2");
    assert_eq!(table_names(&shape), vec!["t"]);
    assert_eq!(column_names(&shape), vec!["a"]);
}

#[test]
fn garbage_input_never_panics() {
    for sql in ["", ")))", "FROM", "WHERE AND OR", "SELECT * FROM (", "'unterminated", "SELECT * FROM t WHERE a ="] {
        let _ = extract(sql);
    }
}
