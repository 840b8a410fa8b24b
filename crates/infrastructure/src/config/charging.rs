//! Charging backend API configuration.

use serde::{Deserialize, Serialize};

/// Trip planning backend configuration
///
/// Points the client at the aggregation backend that fronts Chargetrip
/// and OpenRouteService.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargingAppConfig {
    /// Base URL of the backend API (default: `http://localhost:5000`)
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_api_timeout() -> u64 {
    30
}

impl Default for ChargingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout(),
        }
    }
}

impl ChargingAppConfig {
    /// Convert to `integration_charging::ChargingApiConfig`
    #[must_use]
    pub fn to_api_config(&self) -> integration_charging::ChargingApiConfig {
        integration_charging::ChargingApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
