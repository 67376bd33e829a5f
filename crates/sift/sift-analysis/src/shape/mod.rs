//! Shape extraction: which tables a statement reads and which of their
//! columns appear where an index could help.

pub mod extractor;
pub mod tokenizer;
pub mod types;

pub use extractor::extract;
pub use types::{ColumnRef, Shape, TableRef};
