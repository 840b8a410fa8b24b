//! Routing service port
//!
//! Defines the interface to the remote vehicle and route-planning service.

use async_trait::async_trait;
use domain::{
    ChargingStation, Polyline, RouteEndpoint, TripRequest, VehicleDetails, VehicleSummary,
};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Vehicle details together with the optimal charging time
///
/// Both values come from a single vehicle fetch; the charging time is later
/// merged into the route summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFetch {
    /// The fetched vehicle details
    pub details: VehicleDetails,
    /// Optimal charging time in minutes, from the vehicle's best connector
    pub charging_minutes: Option<f64>,
}

/// A computed route, metrics plus optional geometry
///
/// Every field is individually optional. Callers decide what to do with
/// partial answers; in particular, committing the map geometry is gated on
/// the polyline alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Total distance in kilometers
    pub distance_km: Option<f64>,
    /// Estimated travel time in hours
    pub duration_hours: Option<f64>,
    /// Estimated charging price in euros
    pub price: Option<f64>,
    /// Number of charging stops
    pub station_count: Option<u32>,
    /// Route polyline, `[latitude, longitude]` pairs
    pub route: Option<Polyline>,
    /// Charging stations along the route
    pub stations: Option<Vec<ChargingStation>>,
    /// Resolved departure point
    pub start_point: Option<RouteEndpoint>,
    /// Resolved arrival point
    pub end_point: Option<RouteEndpoint>,
}

impl RoutePlan {
    /// True when the answer carries a polyline
    #[must_use]
    pub const fn has_geometry(&self) -> bool {
        self.route.is_some()
    }
}

/// Charging time and price estimate for a given distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingEstimate {
    /// Estimated charging time in hours
    pub charging_hours: Option<f64>,
    /// Estimated price in euros
    pub price: Option<f64>,
}

/// Port for the remote vehicle and routing service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch the vehicle catalog
    async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, ApplicationError>;

    /// Fetch details and optimal charging time for one vehicle
    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<VehicleFetch, ApplicationError>;

    /// Compute a route with charging stops for a submission
    async fn compute_route(&self, request: &TripRequest) -> Result<RoutePlan, ApplicationError>;

    /// Estimate charging time and price over a distance
    async fn estimate_charging(
        &self,
        vehicle_id: &str,
        distance_km: f64,
    ) -> Result<ChargingEstimate, ApplicationError>;

    /// Check if the routing service is reachable
    async fn is_available(&self) -> bool;
}
