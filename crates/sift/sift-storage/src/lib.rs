//! SQLite persistence for sift: the engine adapter over the observed
//! database, the query log database, migrations, queries, and retention.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;
pub mod retention;
pub mod store;

pub use connection::DatabaseManager;
pub use engine::SqliteEngine;
