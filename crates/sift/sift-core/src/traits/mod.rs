//! Trait seams between the analysis engine and its collaborators.

pub mod advice_store;
pub mod engine;
pub mod query_log;

pub use advice_store::AdviceStore;
pub use engine::StorageEngine;
pub use query_log::{FrequentQuery, QueryLogStore};
