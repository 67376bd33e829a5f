//! Empirical validation and application of candidate indexes.

pub mod apply;
pub mod comparer;
pub mod index_statement;

pub use apply::{apply_index, AppliedIndex};
pub use comparer::Validator;
pub use index_statement::{index_name, IndexStatement};
