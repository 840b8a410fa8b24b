//! Vehicle entities
//!
//! Catalog entries and the details fetched for a chosen vehicle.

use serde::{Deserialize, Serialize};

/// A vehicle catalog entry, as offered in the selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    /// Upstream vehicle identifier
    pub id: String,
    /// Manufacturer name
    pub make: String,
    /// Model name
    pub model: String,
}

impl VehicleSummary {
    /// Create a new catalog entry
    #[must_use]
    pub fn new(id: impl Into<String>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            make: make.into(),
            model: model.into(),
        }
    }

    /// Human-readable name, "make model"
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Details for a chosen vehicle
///
/// Range and image are independently optional; the upstream catalog does not
/// carry them for every vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// Manufacturer name
    pub make: String,
    /// Model name
    pub model: String,
    /// Best-case range in kilometers
    pub best_range_km: Option<f64>,
    /// Display image URL
    pub image_url: Option<String>,
}

impl VehicleDetails {
    /// Create details with only the identity filled in
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            best_range_km: None,
            image_url: None,
        }
    }

    /// Set the best-case range
    #[must_use]
    pub const fn with_range(mut self, best_range_km: f64) -> Self {
        self.best_range_km = Some(best_range_km);
        self
    }

    /// Set the display image URL
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Human-readable name, "make model"
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
