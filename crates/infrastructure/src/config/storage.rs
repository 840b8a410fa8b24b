//! Storage (SQLite) configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// SQLite storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_database_path() -> String {
    "voltroute.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

impl StorageConfig {
    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_path.trim().is_empty() {
            return Err("storage.database_path must not be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("storage.max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}
