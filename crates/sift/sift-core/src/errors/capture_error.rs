//! Query capture errors.

use super::error_code::SiftErrorCode;
use super::{EngineError, StorageError};

/// Errors raised while capturing a statement. Engine failures are surfaced
/// verbatim; nothing is logged when either run fails.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to persist query log entry: {0}")]
    Storage(#[from] StorageError),
}

impl SiftErrorCode for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
