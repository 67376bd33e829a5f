//! Non-fatal shape extraction diagnostics.

use serde::{Deserialize, Serialize};

use super::error_code::{self, SiftErrorCode};

/// A qualifier or clause the shape extractor could not resolve.
/// Collected on the extracted shape; never aborts a recommendation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ParseAmbiguity {
    #[error("qualifier `{qualifier}` matches no table in scope; attributed to `{fallback}`")]
    UnresolvedQualifier { qualifier: String, fallback: String },

    #[error("statement has no FROM clause")]
    MissingFrom,

    #[error("unbalanced parentheses")]
    UnbalancedParens,
}

impl SiftErrorCode for ParseAmbiguity {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_AMBIGUITY
    }
}
