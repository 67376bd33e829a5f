//! Query capture configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CaptureConfig {
    /// Capture plans for write statements when the engine can explain them
    /// without side effects. Default: true.
    pub explain_writes: Option<bool>,
}

impl CaptureConfig {
    pub fn effective_explain_writes(&self) -> bool {
        self.explain_writes.unwrap_or(true)
    }
}
