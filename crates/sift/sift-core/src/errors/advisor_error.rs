//! Facade errors aggregating every subsystem.

use super::error_code::SiftErrorCode;
use super::{CaptureError, ConfigError, EngineError, StorageError, ValidationError};

/// Errors surfaced by the advisor facade.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SiftErrorCode for AdvisorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Capture(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
