//! Charging API adapter - Implements RoutingPort using integration_charging

use application::error::ApplicationError;
use application::ports::{ChargingEstimate, RoutePlan, RoutingPort, VehicleFetch};
use async_trait::async_trait;
use domain::{ChargingStation, RouteEndpoint, TripRequest, VehicleDetails, VehicleSummary};
use integration_charging::{
    ChargingApiClient, ChargingQuote, HttpChargingClient, RouteAnswer, RouteMark, StationStop,
    VehicleData, VehicleListing,
};
use tracing::instrument;

/// Adapter for the EV trip planning backend
pub struct ChargingApiAdapter {
    client: HttpChargingClient,
}

impl std::fmt::Debug for ChargingApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargingApiAdapter")
            .field("client", &"HttpChargingClient")
            .finish()
    }
}

impl ChargingApiAdapter {
    /// Create a new adapter over a configured client
    #[must_use]
    pub const fn new(client: HttpChargingClient) -> Self {
        Self { client }
    }

    /// Convert a catalog listing to the app-layer summary
    fn convert_listing(listing: VehicleListing) -> VehicleSummary {
        VehicleSummary::new(listing.id, listing.make, listing.model)
    }

    /// Convert fetched vehicle data to the app-layer fetch result
    fn convert_vehicle(data: VehicleData) -> VehicleFetch {
        let mut details = VehicleDetails::new(data.make, data.model);
        details.best_range_km = data.best_range_km;
        details.image_url = data.image_url;

        VehicleFetch {
            details,
            charging_minutes: data.charging_minutes,
        }
    }

    /// Convert a route answer to the app-layer plan
    fn convert_route(answer: RouteAnswer) -> RoutePlan {
        RoutePlan {
            distance_km: answer.distance_km,
            duration_hours: answer.duration_hours,
            price: answer.price,
            station_count: answer.station_count,
            route: answer.route,
            stations: answer
                .stations
                .map(|stations| stations.into_iter().map(Self::convert_station).collect()),
            start_point: answer.start_point.map(Self::convert_mark),
            end_point: answer.end_point.map(Self::convert_mark),
        }
    }

    fn convert_station(stop: StationStop) -> ChargingStation {
        ChargingStation {
            name: stop.name,
            latitude: stop.latitude,
            longitude: stop.longitude,
            address: stop.address,
        }
    }

    fn convert_mark(mark: RouteMark) -> RouteEndpoint {
        RouteEndpoint {
            name: mark.name,
            latitude: mark.latitude,
            longitude: mark.longitude,
        }
    }

    const fn convert_quote(quote: ChargingQuote) -> ChargingEstimate {
        ChargingEstimate {
            charging_hours: quote.charging_hours,
            price: quote.price,
        }
    }
}

#[async_trait]
impl RoutingPort for ChargingApiAdapter {
    #[instrument(skip(self))]
    async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, ApplicationError> {
        let listings = self.client.list_vehicles().await.map_err(|e| {
            ApplicationError::ExternalService(format!("Vehicle catalog fetch failed: {e}"))
        })?;

        Ok(listings.into_iter().map(Self::convert_listing).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<VehicleFetch, ApplicationError> {
        let data = self
            .client
            .fetch_vehicle(vehicle_id)
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Vehicle fetch failed: {e}")))?;

        Ok(Self::convert_vehicle(data))
    }

    #[instrument(skip(self))]
    async fn compute_route(&self, request: &TripRequest) -> Result<RoutePlan, ApplicationError> {
        let answer = self.client.compute_route(request).await.map_err(|e| {
            ApplicationError::ExternalService(format!("Route computation failed: {e}"))
        })?;

        Ok(Self::convert_route(answer))
    }

    #[instrument(skip(self))]
    async fn estimate_charging(
        &self,
        vehicle_id: &str,
        distance_km: f64,
    ) -> Result<ChargingEstimate, ApplicationError> {
        let quote = self
            .client
            .estimate_charging(vehicle_id, distance_km)
            .await
            .map_err(|e| {
                ApplicationError::ExternalService(format!("Charging estimate failed: {e}"))
            })?;

        Ok(Self::convert_quote(quote))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
