//! Charging trip data models
//!
//! Typed representations of vehicles, computed routes, and charging stations
//! as returned by the trip planning backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vehicle catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleListing {
    /// Backend vehicle identifier
    pub id: String,
    /// Manufacturer name
    pub make: String,
    /// Model name
    pub model: String,
}

impl VehicleListing {
    /// Create a new catalog entry
    #[must_use]
    pub fn new(id: impl Into<String>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            make: make.into(),
            model: model.into(),
        }
    }

    /// Combined make and model label
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl fmt::Display for VehicleListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Full vehicle details with the optimal charging time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleData {
    /// Manufacturer name
    pub make: String,
    /// Model name
    pub model: String,
    /// Best-case range in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_range_km: Option<f64>,
    /// Product image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optimal charging time in minutes, from the fastest connector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_minutes: Option<f64>,
}

impl fmt::Display for VehicleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.make, self.model)
    }
}

/// A charging station along a computed route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationStop {
    /// Station name
    pub name: String,
    /// Latitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Street address, when the backend knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl StationStop {
    /// Create a new station stop
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
            address: None,
        }
    }

    /// Attach coordinates
    #[must_use]
    pub const fn with_coords(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

impl fmt::Display for StationStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A resolved route endpoint, departure or arrival
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteMark {
    /// Place name as submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Latitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A computed route with metrics and optional geometry
///
/// The backend answers with whatever it could compute. Any field may be
/// absent, including the polyline itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteAnswer {
    /// Total distance in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Estimated travel time in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    /// Estimated charging price in euros
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Number of charging stops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_count: Option<u32>,
    /// Route polyline, `[latitude, longitude]` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<[f64; 2]>>,
    /// Charging stations along the route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<StationStop>>,
    /// Resolved departure point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point: Option<RouteMark>,
    /// Resolved arrival point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point: Option<RouteMark>,
}

impl RouteAnswer {
    /// True when the answer carries a polyline
    #[must_use]
    pub const fn has_geometry(&self) -> bool {
        self.route.is_some()
    }
}

/// Charging time and price estimate for a distance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChargingQuote {
    /// Estimated charging time in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_hours: Option<f64>,
    /// Estimated price in euros
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_display_name() {
        let listing = VehicleListing::new("5f043aa8bc262f1627fc032b", "Tesla", "Model 3");
        assert_eq!(listing.display_name(), "Tesla Model 3");
        assert_eq!(listing.to_string(), "Tesla Model 3");
    }

    #[test]
    fn test_station_display() {
        let station = StationStop::new("Ionity Mâcon").with_coords(46.3, 4.8);
        assert_eq!(station.to_string(), "Ionity Mâcon");
        assert_eq!(station.latitude, Some(46.3));
    }

    #[test]
    fn test_route_answer_geometry() {
        let mut answer = RouteAnswer {
            distance_km: Some(465.2),
            ..RouteAnswer::default()
        };
        assert!(!answer.has_geometry());

        answer.route = Some(vec![[48.8566, 2.3522], [45.764, 4.8357]]);
        assert!(answer.has_geometry());
    }

    #[test]
    fn test_route_answer_serialization_skips_absent_fields() {
        let answer = RouteAnswer {
            distance_km: Some(465.2),
            ..RouteAnswer::default()
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert!(json.contains("distance_km"));
        assert!(!json.contains("route"));
        assert!(!json.contains("stations"));
    }

    #[test]
    fn test_vehicle_data_roundtrip() {
        let data = VehicleData {
            make: "Renault".to_string(),
            model: "Zoe".to_string(),
            best_range_km: Some(395.0),
            image_url: None,
            charging_minutes: Some(56.0),
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: VehicleData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
