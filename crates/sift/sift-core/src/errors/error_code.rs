//! SiftErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable code string
/// that callers (UI layers, log pipelines) can match on.
pub trait SiftErrorCode {
    /// Returns the error code string (e.g., "ENGINE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const ENGINE_ERROR: &str = "ENGINE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const QUERY_EXECUTION_ERROR: &str = "QUERY_EXECUTION_ERROR";
pub const MALFORMED_STATEMENT: &str = "MALFORMED_STATEMENT";
pub const INDEX_CREATION_ERROR: &str = "INDEX_CREATION_ERROR";
pub const PARSE_AMBIGUITY: &str = "PARSE_AMBIGUITY";
pub const SESSION_UNAVAILABLE: &str = "SESSION_UNAVAILABLE";
