//! Capture against a real SQLite session and log database.

use sift_analysis::capture::{QueryCapture, StatementKind};
use sift_core::config::CaptureConfig;
use sift_core::errors::CaptureError;
use sift_core::traits::{QueryLogStore, StorageEngine};
use sift_core::types::SqlValue;
use sift_storage::{DatabaseManager, SqliteEngine};

fn setup() -> (SqliteEngine, DatabaseManager) {
    let engine = SqliteEngine::open_in_memory().unwrap();
    engine
        .execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER);
             INSERT INTO users (name, age) VALUES ('ann', 31), ('bob', 42), ('cy', 31);",
        )
        .unwrap();
    (engine, DatabaseManager::open_in_memory().unwrap())
}

#[test]
fn read_is_planned_timed_and_logged() {
    let (engine, store) = setup();
    let result = QueryCapture::default()
        .capture(&engine, &store, "SELECT name FROM users WHERE age = 31 ORDER BY id")
        .unwrap();

    assert_eq!(result.kind, StatementKind::Read);
    assert!(result.execution_time_secs >= 0.0);
    assert!(result.execution_plan.contains("SCAN"), "{}", result.execution_plan);
    assert_eq!(result.output.rows.len(), 2);
    assert_eq!(result.output.rows[0][0], SqlValue::Text("ann".into()));

    let logs = store.recent(10).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(Some(logs[0].id), result.log_id);
    assert_eq!(logs[0].execution_plan, result.execution_plan);
}

#[test]
fn control_statements_run_but_are_not_logged() {
    let (engine, store) = setup();
    let capture = QueryCapture::default();

    let pragma = capture.capture(&engine, &store, "PRAGMA table_info(users)").unwrap();
    assert_eq!(pragma.kind, StatementKind::Control);
    assert!(pragma.log_id.is_none());
    assert_eq!(pragma.output.rows.len(), 3);

    let explain = capture
        .capture(&engine, &store, "explain query plan SELECT * FROM users")
        .unwrap();
    assert!(explain.log_id.is_none());
    assert!(explain.execution_plan.is_empty());

    assert!(store.recent(10).unwrap().is_empty());
}

#[test]
fn writes_execute_exactly_once() {
    let (engine, store) = setup();
    let result = QueryCapture::default()
        .capture(&engine, &store, "UPDATE users SET age = age + 1 WHERE name = 'bob'")
        .unwrap();

    assert_eq!(result.kind, StatementKind::Write);
    assert_eq!(result.output.rows_affected, 1);
    assert!(!result.execution_plan.is_empty());

    let age = engine.execute("SELECT age FROM users WHERE name = 'bob'").unwrap();
    assert_eq!(age.rows[0][0], SqlValue::Integer(43));

    let inserted = QueryCapture::default()
        .capture(&engine, &store, "INSERT INTO users (name, age) VALUES ('dee', 20)")
        .unwrap();
    assert!(inserted.log_id.is_some());
    assert_eq!(engine.row_count("users").unwrap(), 4);
    assert_eq!(store.recent(10).unwrap().len(), 2);
}

#[test]
fn write_plans_can_be_disabled() {
    let (engine, store) = setup();
    let capture = QueryCapture::from(&CaptureConfig {
        explain_writes: Some(false),
    });
    let result = capture
        .capture(&engine, &store, "DELETE FROM users WHERE age > 40")
        .unwrap();
    assert!(result.execution_plan.is_empty());
    assert_eq!(result.output.rows_affected, 1);
}

#[test]
fn failures_are_surfaced_and_not_logged() {
    let (engine, store) = setup();
    let err = QueryCapture::default()
        .capture(&engine, &store, "SELECT * FROM nowhere")
        .unwrap_err();
    assert!(matches!(err, CaptureError::Engine(_)));
    assert_eq!(err.to_string(), "no such table: nowhere");

    let write_err = QueryCapture::new(false)
        .capture(&engine, &store, "INSERT INTO nowhere VALUES (1)")
        .unwrap_err();
    assert!(write_err.to_string().contains("no such table"));

    assert!(store.recent(10).unwrap().is_empty());
}

#[test]
fn log_entries_accumulate_in_capture_order() {
    let (engine, store) = setup();
    let capture = QueryCapture::default();
    let ids: Vec<i64> = (0..3)
        .map(|i| {
            capture
                .capture(&engine, &store, &format!("SELECT * FROM users WHERE age > {i}"))
                .unwrap()
                .log_id
                .unwrap()
        })
        .collect();

    let recent: Vec<i64> = store.recent(10).unwrap().iter().map(|e| e.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(recent, expected);
}
