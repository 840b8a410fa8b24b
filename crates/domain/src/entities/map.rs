//! Map data entities
//!
//! Geometry returned with a computed route: the polyline, the charging
//! stations along it, and the two endpoints. Everything here is optional;
//! the map slice replaces wholesale only when the upstream sends a route.

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// Route polyline as `[latitude, longitude]` pairs
pub type Polyline = Vec<[f64; 2]>;

/// A charging station suggested along the route
///
/// Coordinates are independently optional. A station without both
/// coordinates still carries its name but cannot be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStation {
    /// Station name
    pub name: String,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Street address, when known
    pub address: Option<String>,
}

impl ChargingStation {
    /// Create a station with only the name filled in
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
            address: None,
        }
    }

    /// Set both coordinates
    #[must_use]
    pub const fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// The station's position, when both coordinates are present and valid
    #[must_use]
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        }
    }
}

/// Origin or destination of a planned route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEndpoint {
    /// City name as resolved upstream
    pub name: Option<String>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

impl RouteEndpoint {
    /// Create an endpoint with a name and both coordinates
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// The endpoint's position, when both coordinates are present and valid
    #[must_use]
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        }
    }
}

/// Geometry for the trip map
///
/// The default value is the struct-of-nulls shown before any trip is
/// planned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Route polyline
    pub route: Option<Polyline>,
    /// Charging stations along the route
    pub stations: Option<Vec<ChargingStation>>,
    /// Departure point
    pub start: Option<RouteEndpoint>,
    /// Arrival point
    pub end: Option<RouteEndpoint>,
}

impl MapData {
    /// True when no geometry is present at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.route.is_none()
            && self.stations.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}
