//! HTTP client for the trip planning backend
//!
//! Covers the backend's four JSON endpoints: vehicle catalog, per-vehicle
//! details, route computation, and charging estimates.

use std::time::Duration;

use async_trait::async_trait;
use domain::TripRequest;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::ChargingApiConfig;
use crate::error::ChargingApiError;
use crate::models::{
    ChargingQuote, RouteAnswer, RouteMark, StationStop, VehicleData, VehicleListing,
};

/// Trait for trip planning backend clients
#[async_trait]
pub trait ChargingApiClient: Send + Sync {
    /// Fetch the vehicle catalog
    async fn list_vehicles(&self) -> Result<Vec<VehicleListing>, ChargingApiError>;

    /// Fetch details and optimal charging time for one vehicle
    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<VehicleData, ChargingApiError>;

    /// Compute a route with charging stops for a submission
    async fn compute_route(&self, request: &TripRequest) -> Result<RouteAnswer, ChargingApiError>;

    /// Estimate charging time and price over a distance
    async fn estimate_charging(
        &self,
        vehicle_id: &str,
        distance_km: f64,
    ) -> Result<ChargingQuote, ChargingApiError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;
}

/// HTTP client for the trip planning backend's JSON API
#[derive(Debug)]
pub struct HttpChargingClient {
    client: Client,
    config: ChargingApiConfig,
}

impl HttpChargingClient {
    /// Create a new backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &ChargingApiConfig) -> Result<Self, ChargingApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("voltroute/1.0")
            .build()
            .map_err(|e| ChargingApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw catalog response into typed listings
    fn parse_vehicles_response(body: &str) -> Result<Vec<VehicleListing>, ChargingApiError> {
        let raw: RawVehiclesResponse =
            serde_json::from_str(body).map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        Ok(raw.vehicles.into_iter().map(Self::convert_listing).collect())
    }

    /// Convert a raw catalog entry to a typed listing
    fn convert_listing(raw: RawVehicleListing) -> VehicleListing {
        let naming = raw.naming.unwrap_or_default();
        VehicleListing {
            id: raw.id.unwrap_or_default(),
            make: naming.make.unwrap_or_default(),
            model: naming.model.unwrap_or_default(),
        }
    }

    /// Parse the raw vehicle response into typed vehicle data
    fn parse_vehicle_response(body: &str) -> Result<VehicleData, ChargingApiError> {
        let raw: RawVehicleResponse =
            serde_json::from_str(body).map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        let details = raw.vehicle_details.unwrap_or_default();
        let naming = details.naming.unwrap_or_default();

        Ok(VehicleData {
            make: naming.make.unwrap_or_default(),
            model: naming.model.unwrap_or_default(),
            best_range_km: details
                .range
                .and_then(|r| r.chargetrip_range)
                .and_then(|r| r.best),
            image_url: details.media.and_then(|m| m.image).and_then(|i| i.url),
            charging_minutes: raw.optimal_charging_time,
        })
    }

    /// Parse the raw route response into a typed answer
    fn parse_route_response(body: &str) -> Result<RouteAnswer, ChargingApiError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        Ok(RouteAnswer {
            distance_km: raw.distance,
            duration_hours: raw.time,
            price: raw.price,
            station_count: raw.nb_stations,
            route: raw.route,
            stations: raw
                .stations
                .map(|stations| stations.into_iter().map(Self::convert_station).collect()),
            start_point: raw.start_point.map(Self::convert_mark),
            end_point: raw.end_point.map(Self::convert_mark),
        })
    }

    /// Convert a raw station to a typed station stop
    ///
    /// The backend sends an empty address when it has none.
    fn convert_station(raw: RawStation) -> StationStop {
        StationStop {
            name: raw
                .name
                .unwrap_or_else(|| "Charging station".to_string()),
            latitude: raw.lat,
            longitude: raw.lon,
            address: raw.address.filter(|address| !address.is_empty()),
        }
    }

    /// Convert a raw endpoint to a typed route mark
    fn convert_mark(raw: RawMark) -> RouteMark {
        RouteMark {
            name: raw.name,
            latitude: raw.lat,
            longitude: raw.lon,
        }
    }

    /// Parse the raw charging estimate response
    fn parse_quote_response(body: &str) -> Result<ChargingQuote, ChargingApiError> {
        let raw: RawChargingTimeResponse =
            serde_json::from_str(body).map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        Ok(ChargingQuote {
            charging_hours: raw.charging_time,
            price: raw.price,
        })
    }
}

#[async_trait]
impl ChargingApiClient for HttpChargingClient {
    #[instrument(skip(self))]
    async fn list_vehicles(&self) -> Result<Vec<VehicleListing>, ChargingApiError> {
        let url = format!("{}/api/vehicles", self.config.base_url);

        debug!(?url, "Fetching vehicle catalog");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ChargingApiError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ChargingApiError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChargingApiError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        let vehicles = Self::parse_vehicles_response(&body)?;

        if vehicles.is_empty() {
            warn!("Vehicle catalog is empty");
        }

        debug!(count = vehicles.len(), "Vehicles fetched");
        Ok(vehicles)
    }

    #[instrument(skip(self))]
    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<VehicleData, ChargingApiError> {
        let url = format!("{}/api/vehicle/{vehicle_id}", self.config.base_url);

        debug!(?url, "Fetching vehicle details");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ChargingApiError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ChargingApiError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChargingApiError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        Self::parse_vehicle_response(&body)
    }

    #[instrument(
        skip(self, request),
        fields(
            vehicle = request.vehicle_id(),
            from = request.origin(),
            to = request.destination(),
        )
    )]
    async fn compute_route(&self, request: &TripRequest) -> Result<RouteAnswer, ChargingApiError> {
        let url = format!("{}/api/route", self.config.base_url);

        let payload = json!({
            "start": request.origin(),
            "end": request.destination(),
            "vehicle": request.vehicle_id(),
        });

        debug!(?url, "Computing route");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChargingApiError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    ChargingApiError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        // The backend answers 400 when it cannot compute a route
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ChargingApiError::NoRouteFound {
                from: request.origin().to_string(),
                to: request.destination().to_string(),
            });
        }

        if !status.is_success() {
            return Err(ChargingApiError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        let answer = Self::parse_route_response(&body)?;

        if !answer.has_geometry() {
            warn!("Route answer carries no polyline");
        }

        debug!(
            distance_km = ?answer.distance_km,
            stations = ?answer.station_count,
            "Route computed"
        );
        Ok(answer)
    }

    #[instrument(skip(self))]
    async fn estimate_charging(
        &self,
        vehicle_id: &str,
        distance_km: f64,
    ) -> Result<ChargingQuote, ChargingApiError> {
        let url = format!("{}/api/charging-time", self.config.base_url);

        let payload = json!({
            "distance": distance_km,
            "vehicle": vehicle_id,
        });

        debug!(?url, "Estimating charging cost");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChargingApiError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    ChargingApiError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChargingApiError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChargingApiError::ParseError(e.to_string()))?;

        Self::parse_quote_response(&body)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/api/vehicles", self.config.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawVehiclesResponse {
    vehicles: Vec<RawVehicleListing>,
}

#[derive(Debug, Deserialize)]
struct RawVehicleListing {
    id: Option<String>,
    naming: Option<RawNaming>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNaming {
    make: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVehicleResponse {
    vehicle_details: Option<RawVehicleDetails>,
    optimal_charging_time: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVehicleDetails {
    naming: Option<RawNaming>,
    media: Option<RawMedia>,
    range: Option<RawRange>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    chargetrip_range: Option<RawChargetripRange>,
}

#[derive(Debug, Deserialize)]
struct RawChargetripRange {
    best: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    route: Option<Vec<[f64; 2]>>,
    stations: Option<Vec<RawStation>>,
    #[serde(rename = "startPoint")]
    start_point: Option<RawMark>,
    #[serde(rename = "endPoint")]
    end_point: Option<RawMark>,
    distance: Option<f64>,
    time: Option<f64>,
    price: Option<f64>,
    nb_stations: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawStation {
    lat: Option<f64>,
    lon: Option<f64>,
    name: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMark {
    lat: Option<f64>,
    lon: Option<f64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChargingTimeResponse {
    charging_time: Option<f64>,
    price: Option<f64>,
}
