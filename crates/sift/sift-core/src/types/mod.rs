//! Domain types shared across crates.

pub mod candidate;
pub mod collections;
pub mod comparison;
pub mod query_log;
pub mod schema;

pub use candidate::IndexCandidate;
pub use collections::{FxHashMap, FxHashSet, SmallVec4};
pub use comparison::ComparisonResult;
pub use query_log::{NewQueryLogEntry, QueryLogEntry};
pub use schema::{ColumnInfo, IndexColumn, IndexInfo, QueryOutput, SqlValue};
