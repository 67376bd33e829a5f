//! Database location configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file observed and used for the query log.
    /// Default: "index_recommendation.db".
    pub db_file: Option<String>,
    /// Directory for database backups. Default: "backups".
    pub backup_directory: Option<String>,
}

impl DatabaseConfig {
    pub fn effective_db_file(&self) -> &str {
        self.db_file.as_deref().unwrap_or("index_recommendation.db")
    }

    pub fn effective_backup_directory(&self) -> &str {
        self.backup_directory.as_deref().unwrap_or("backups")
    }
}
