//! Storage engine adapter errors.

use super::error_code::{self, SiftErrorCode};

/// Any failure raised by the underlying engine: syntax, constraint
/// violation, I/O. Messages are carried verbatim from the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("{message}")]
    Sqlite { message: String },

    #[error("engine session lock poisoned")]
    LockPoisoned,
}

impl EngineError {
    /// Wrap an engine message.
    pub fn sqlite(message: impl Into<String>) -> Self {
        Self::Sqlite {
            message: message.into(),
        }
    }
}

impl SiftErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => error_code::ENGINE_ERROR,
            Self::LockPoisoned => error_code::SESSION_UNAVAILABLE,
        }
    }
}
