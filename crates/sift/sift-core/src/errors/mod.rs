//! Error handling for sift.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod advisor_error;
pub mod capture_error;
pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod parse_ambiguity;
pub mod storage_error;
pub mod validation_error;

pub use advisor_error::AdvisorError;
pub use capture_error::CaptureError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::SiftErrorCode;
pub use parse_ambiguity::ParseAmbiguity;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
