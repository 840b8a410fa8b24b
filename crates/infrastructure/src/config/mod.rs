//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `charging`: trip planning backend API
//! - `storage`: SQLite database settings
//! - `map`: map viewport and marker icons
//!
//! Values come from defaults, then an optional `config.toml`, then
//! environment variables prefixed `VOLTROUTE`.

mod charging;
mod map;
mod storage;

use serde::{Deserialize, Serialize};

pub use charging::ChargingAppConfig;
pub use map::MapAppConfig;
pub use storage::StorageConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Charging backend API settings
    #[serde(default)]
    pub api: ChargingAppConfig,

    /// SQLite storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, preferring an explicit file when given
    ///
    /// Without an explicit path a `config.toml` next to the binary is
    /// picked up when present; with one, a missing file is an error.
    pub fn load_from(file: Option<&str>) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("api.base_url", "http://localhost:5000")?
            .set_default("api.timeout_secs", 30)?
            // Load from file if exists
            .add_source(file_source)
            // Override with environment variables (e.g., VOLTROUTE_API_BASE_URL)
            .add_source(
                config::Environment::with_prefix("VOLTROUTE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first failing section's message.
    pub fn validate(&self) -> Result<(), String> {
        self.api.to_api_config().validate()?;
        self.storage.validate()?;
        self.map.validate()?;
        Ok(())
    }
}
