//! Route summary entity

use serde::{Deserialize, Serialize};

/// Summary figures for a computed route
///
/// Merged from both pipeline stages: the metrics come from the route
/// computation, the charging time from the vehicle fetch. Every field is
/// individually optional; the upstream answers with whatever it could
/// calculate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Total distance in kilometers
    pub distance_km: Option<f64>,
    /// Estimated travel time in hours
    pub duration_hours: Option<f64>,
    /// Estimated charging price in euros
    pub price: Option<f64>,
    /// Number of charging stops along the route
    pub station_count: Option<u32>,
    /// Optimal charging time in minutes, from the vehicle's best connector
    pub charging_minutes: Option<f64>,
}

impl RouteInfo {
    /// True when no field carries a value
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.distance_km.is_none()
            && self.duration_hours.is_none()
            && self.price.is_none()
            && self.station_count.is_none()
            && self.charging_minutes.is_none()
    }
}
