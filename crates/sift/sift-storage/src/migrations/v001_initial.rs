//! V001: Initial schema.
//! query_logs, index_recommendations, performance_comparisons.

pub const MIGRATION_SQL: &str = r#"
-- Captured statements. Append-only; rows are removed only by retention.
CREATE TABLE IF NOT EXISTS query_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    execution_time REAL NOT NULL CHECK (execution_time >= 0),
    execution_plan TEXT NOT NULL DEFAULT '',
    timestamp INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_query_logs_timestamp ON query_logs(timestamp);
CREATE INDEX IF NOT EXISTS idx_query_logs_query ON query_logs(query);

-- Candidates a caller chose to keep. column_name holds the display form
-- ("a, b" for composites).
CREATE TABLE IF NOT EXISTS index_recommendations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    score REAL NOT NULL,
    index_type TEXT NOT NULL DEFAULT '',
    index_name TEXT NOT NULL,
    create_statement TEXT NOT NULL,
    applied INTEGER NOT NULL DEFAULT 0,
    timestamp INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_index_recommendations_table
    ON index_recommendations(table_name);

-- Validator outcomes a caller chose to keep. Times in milliseconds.
CREATE TABLE IF NOT EXISTS performance_comparisons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query_id INTEGER REFERENCES query_logs(id),
    original_time REAL NOT NULL,
    optimized_time REAL NOT NULL,
    improvement_percent REAL NOT NULL,
    index_id INTEGER REFERENCES index_recommendations(id),
    timestamp INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_performance_comparisons_query
    ON performance_comparisons(query_id);
CREATE INDEX IF NOT EXISTS idx_performance_comparisons_index
    ON performance_comparisons(index_id);
"#;
