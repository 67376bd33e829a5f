//! Query modules for each persistence table.

pub mod comparisons;
pub mod query_logs;
pub mod recommendations;
