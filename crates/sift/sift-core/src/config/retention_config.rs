//! Query log retention configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    /// Days of query log kept. Default: 30.
    pub log_retention_days: Option<u32>,
}

impl RetentionConfig {
    pub fn effective_log_retention_days(&self) -> u32 {
        self.log_retention_days.unwrap_or(30)
    }
}
