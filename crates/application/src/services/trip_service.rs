//! Trip planning orchestrator
//!
//! Runs the two-stage pipeline against the routing service: vehicle details
//! first, then the route computation. Each slice commits as soon as its
//! stage succeeds, so a failure in the second stage keeps the vehicle
//! committed by the first. The map slice replaces wholesale, and only when
//! the route answer carries a polyline.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use domain::{MapData, RouteInfo, TripRequest, VehicleDetails};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ChargingEstimate, RoutingPort, TripSlice, TripStoreExt, TripStorePort},
};

/// Committed trip state, one field per persisted slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripState {
    /// Details of the last fetched vehicle
    pub vehicle: Option<VehicleDetails>,
    /// Last merged route summary
    pub route: Option<RouteInfo>,
    /// Last committed map geometry
    pub map: MapData,
}

/// Snapshot returned after a successful plan
#[derive(Debug, Clone, PartialEq)]
pub struct TripOutcome {
    /// The vehicle committed in stage one
    pub vehicle: VehicleDetails,
    /// The merged route summary
    pub route: RouteInfo,
    /// The map geometry after the plan (unchanged when no polyline came back)
    pub map: MapData,
}

/// Orchestrates the two-stage trip pipeline
pub struct TripService {
    routing: Arc<dyn RoutingPort>,
    store: Arc<dyn TripStorePort>,
    state: RwLock<TripState>,
    loading: AtomicBool,
}

impl fmt::Debug for TripService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripService")
            .field("loading", &self.loading.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl TripService {
    /// Create a new trip service
    pub fn new(routing: Arc<dyn RoutingPort>, store: Arc<dyn TripStorePort>) -> Self {
        Self {
            routing,
            store,
            state: RwLock::new(TripState::default()),
            loading: AtomicBool::new(false),
        }
    }

    /// Restore all three slices from the store
    ///
    /// Missing or malformed slices silently become their defaults; a store
    /// failure degrades to an empty state and is only logged.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) {
        let vehicle = match self.store.load_vehicle().await {
            Ok(vehicle) => vehicle,
            Err(e) => {
                warn!(slice = TripSlice::VehicleDetails.key(), error = %e, "Failed to load stored slice");
                None
            },
        };
        let route = match self.store.load_route().await {
            Ok(route) => route,
            Err(e) => {
                warn!(slice = TripSlice::RouteInfo.key(), error = %e, "Failed to load stored slice");
                None
            },
        };
        let map = match self.store.load_map().await {
            Ok(map) => map.unwrap_or_default(),
            Err(e) => {
                warn!(slice = TripSlice::MapData.key(), error = %e, "Failed to load stored slice");
                MapData::default()
            },
        };

        let restored = vehicle.is_some() || route.is_some() || !map.is_empty();
        {
            let mut state = self.state.write();
            state.vehicle = vehicle;
            state.route = route;
            state.map = map;
        }

        if restored {
            info!("Restored previous trip from store");
        } else {
            debug!("No previous trip in store");
        }
    }

    /// Plan a trip for a validated submission
    ///
    /// Stage one fetches the vehicle details, stage two computes the route.
    /// The loading flag is held for the whole pipeline and released on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::SubmissionInFlight` when a plan is already
    /// running, or the failing stage's error otherwise. State committed by
    /// completed stages is kept either way.
    #[instrument(
        skip(self, request),
        fields(
            vehicle = request.vehicle_id(),
            origin = request.origin(),
            destination = request.destination(),
        )
    )]
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripOutcome, ApplicationError> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Rejecting submission, another plan is in flight");
            return Err(ApplicationError::SubmissionInFlight);
        }

        let outcome = self.run_pipeline(request).await;
        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_pipeline(&self, request: &TripRequest) -> Result<TripOutcome, ApplicationError> {
        // Stage one: vehicle details
        let fetch = match self.routing.fetch_vehicle(request.vehicle_id()).await {
            Ok(fetch) => fetch,
            Err(e) => {
                warn!(error = %e, "Vehicle fetch failed, aborting plan");
                return Err(e);
            },
        };

        self.state.write().vehicle = Some(fetch.details.clone());
        if let Err(e) = self.store.save_vehicle(&fetch.details).await {
            warn!(slice = TripSlice::VehicleDetails.key(), error = %e, "Failed to persist slice");
        }

        // Stage two: route computation. The vehicle committed above stays
        // committed even when this stage fails.
        let plan = match self.routing.compute_route(request).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Route computation failed, keeping vehicle details");
                return Err(e);
            },
        };

        let route = RouteInfo {
            distance_km: plan.distance_km,
            duration_hours: plan.duration_hours,
            price: plan.price,
            station_count: plan.station_count,
            charging_minutes: fetch.charging_minutes,
        };
        self.state.write().route = Some(route.clone());
        if let Err(e) = self.store.save_route(&route).await {
            warn!(slice = TripSlice::RouteInfo.key(), error = %e, "Failed to persist slice");
        }

        // The map slice replaces wholesale, gated on the polyline alone
        if let Some(polyline) = plan.route {
            let map = MapData {
                route: Some(polyline),
                stations: plan.stations,
                start: plan.start_point,
                end: plan.end_point,
            };
            self.state.write().map = map.clone();
            if let Err(e) = self.store.save_map(&map).await {
                warn!(slice = TripSlice::MapData.key(), error = %e, "Failed to persist slice");
            }
        } else {
            debug!("Route answer carried no polyline, keeping previous map");
        }

        info!(
            distance_km = ?route.distance_km,
            station_count = ?route.station_count,
            "Trip planned"
        );

        Ok(TripOutcome {
            vehicle: fetch.details,
            route,
            map: self.state.read().map.clone(),
        })
    }

    /// Estimate charging time and price over a distance
    ///
    /// Pass-through to the routing service; commits nothing.
    ///
    /// # Errors
    ///
    /// Returns the routing service's error unchanged.
    #[instrument(skip(self))]
    pub async fn estimate_charging(
        &self,
        vehicle_id: &str,
        distance_km: f64,
    ) -> Result<ChargingEstimate, ApplicationError> {
        self.routing.estimate_charging(vehicle_id, distance_km).await
    }

    /// Check if the routing service is reachable
    pub async fn service_available(&self) -> bool {
        self.routing.is_available().await
    }

    /// The committed vehicle details, if any
    #[must_use]
    pub fn vehicle_details(&self) -> Option<VehicleDetails> {
        self.state.read().vehicle.clone()
    }

    /// The committed route summary, if any
    #[must_use]
    pub fn route_info(&self) -> Option<RouteInfo> {
        self.state.read().route.clone()
    }

    /// The committed map geometry
    #[must_use]
    pub fn map_data(&self) -> MapData {
        self.state.read().map.clone()
    }

    /// A snapshot of all committed state
    #[must_use]
    pub fn snapshot(&self) -> TripState {
        self.state.read().clone()
    }

    /// Whether a plan is currently in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use domain::{ChargingStation, RouteEndpoint, VehicleSummary};
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        ports::{MockRoutingPort, RoutePlan, VehicleFetch},
        services::{FormRejection, TripForm},
    };

    /// In-memory store double, shared between service instances in tests
    #[derive(Debug, Default)]
    struct MemoryTripStore {
        slices: Mutex<HashMap<&'static str, String>>,
    }

    #[async_trait]
    impl TripStorePort for MemoryTripStore {
        async fn load_slice(&self, slice: TripSlice) -> Result<Option<String>, ApplicationError> {
            Ok(self.slices.lock().get(slice.key()).cloned())
        }

        async fn save_slice(
            &self,
            slice: TripSlice,
            value: String,
        ) -> Result<(), ApplicationError> {
            self.slices.lock().insert(slice.key(), value);
            Ok(())
        }
    }

    /// Store double that fails every operation
    #[derive(Debug)]
    struct BrokenTripStore;

    #[async_trait]
    impl TripStorePort for BrokenTripStore {
        async fn load_slice(&self, _: TripSlice) -> Result<Option<String>, ApplicationError> {
            Err(ApplicationError::Persistence("disk on fire".to_string()))
        }

        async fn save_slice(&self, _: TripSlice, _: String) -> Result<(), ApplicationError> {
            Err(ApplicationError::Persistence("disk on fire".to_string()))
        }
    }

    fn sample_request() -> TripRequest {
        TripRequest::new("veh-1", "Paris", "Lyon").unwrap()
    }

    fn sample_fetch() -> VehicleFetch {
        VehicleFetch {
            details: VehicleDetails::new("Tesla", "Model 3")
                .with_range(465.0)
                .with_image_url("https://cars.example/model3.png"),
            charging_minutes: Some(40.0),
        }
    }

    fn sample_plan_with_geometry() -> RoutePlan {
        RoutePlan {
            distance_km: Some(465.2),
            duration_hours: Some(4.5),
            price: Some(18.3),
            station_count: Some(2),
            route: Some(vec![[48.8566, 2.3522], [46.3, 4.8], [45.764, 4.8357]]),
            stations: Some(vec![
                ChargingStation::new("Ionity Mâcon")
                    .with_position(46.3, 4.8)
                    .with_address("Aire de Mâcon, A6"),
                ChargingStation::new("Total Beaune").with_position(47.0, 4.85),
            ]),
            start_point: Some(RouteEndpoint::new("Paris", 48.8566, 2.3522)),
            end_point: Some(RouteEndpoint::new("Lyon", 45.764, 4.8357)),
        }
    }

    fn sample_plan_without_geometry() -> RoutePlan {
        RoutePlan {
            distance_km: Some(465.2),
            duration_hours: Some(4.5),
            price: Some(18.3),
            station_count: Some(2),
            ..RoutePlan::default()
        }
    }

    fn service_with(
        routing: MockRoutingPort,
        store: Arc<dyn TripStorePort>,
    ) -> TripService {
        TripService::new(Arc::new(routing), store)
    }

    #[tokio::test]
    async fn successful_plan_commits_all_three_slices() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .times(1)
            .returning(|_| Ok(sample_fetch()));
        routing
            .expect_compute_route()
            .times(1)
            .returning(|_| Ok(sample_plan_with_geometry()));

        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());

        let outcome = service.plan_trip(&sample_request()).await.unwrap();

        assert_eq!(outcome.vehicle.display_name(), "Tesla Model 3");
        assert_eq!(outcome.route.distance_km, Some(465.2));
        assert_eq!(outcome.route.station_count, Some(2));
        assert_eq!(outcome.route.charging_minutes, Some(40.0));
        assert_eq!(outcome.map.route.as_ref().map(Vec::len), Some(3));

        let state = service.snapshot();
        assert!(state.vehicle.is_some());
        assert!(state.route.is_some());
        assert!(!state.map.is_empty());

        let stored = store.slices.lock();
        assert!(stored.contains_key("vehicle_details"));
        assert!(stored.contains_key("route_info"));
        assert!(stored.contains_key("map_data"));
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn charging_minutes_merge_from_the_vehicle_stage() {
        let mut routing = MockRoutingPort::new();
        routing.expect_fetch_vehicle().returning(|_| {
            Ok(VehicleFetch {
                details: VehicleDetails::new("Renault", "Zoe"),
                charging_minutes: Some(55.0),
            })
        });
        // The route stage alone knows nothing about charging time
        routing
            .expect_compute_route()
            .returning(|_| Ok(sample_plan_without_geometry()));

        let service = service_with(routing, Arc::new(MemoryTripStore::default()));
        let outcome = service.plan_trip(&sample_request()).await.unwrap();

        assert_eq!(outcome.route.charging_minutes, Some(55.0));
    }

    #[tokio::test]
    async fn vehicle_fetch_failure_aborts_without_committing() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 500".to_string())));
        routing.expect_compute_route().times(0);

        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());

        let err = service.plan_trip(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));

        assert_eq!(service.snapshot(), TripState::default());
        assert!(store.slices.lock().is_empty());
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn route_failure_keeps_the_committed_vehicle() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .returning(|_| Ok(sample_fetch()));
        routing
            .expect_compute_route()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 400".to_string())));

        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());

        let err = service.plan_trip(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));

        let state = service.snapshot();
        assert_eq!(
            state.vehicle.as_ref().map(VehicleDetails::display_name),
            Some("Tesla Model 3".to_string())
        );
        assert!(state.route.is_none());
        assert!(state.map.is_empty());

        let stored = store.slices.lock();
        assert!(stored.contains_key("vehicle_details"));
        assert!(!stored.contains_key("route_info"));
        assert!(!stored.contains_key("map_data"));
        drop(stored);
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn answer_without_polyline_keeps_the_previous_map() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .returning(|_| Ok(sample_fetch()));
        let mut plans = vec![sample_plan_with_geometry(), sample_plan_without_geometry()];
        routing
            .expect_compute_route()
            .returning(move |_| Ok(plans.remove(0)));

        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());

        // First plan commits a full map
        service.plan_trip(&sample_request()).await.unwrap();
        let first_map = service.map_data();
        assert!(!first_map.is_empty());

        // Second answer has stations but no polyline; the map must not move
        let outcome = service.plan_trip(&sample_request()).await.unwrap();
        assert_eq!(service.map_data(), first_map);
        assert_eq!(outcome.map, first_map);
        assert_eq!(outcome.route.distance_km, Some(465.2));
    }

    #[tokio::test]
    async fn store_write_failures_do_not_fail_the_plan() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .returning(|_| Ok(sample_fetch()));
        routing
            .expect_compute_route()
            .returning(|_| Ok(sample_plan_with_geometry()));

        let service = service_with(routing, Arc::new(BrokenTripStore));
        let outcome = service.plan_trip(&sample_request()).await.unwrap();

        assert_eq!(outcome.route.distance_km, Some(465.2));
        assert!(service.vehicle_details().is_some());
    }

    #[tokio::test]
    async fn hydrate_restores_persisted_slices() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_fetch_vehicle()
            .returning(|_| Ok(sample_fetch()));
        routing
            .expect_compute_route()
            .returning(|_| Ok(sample_plan_with_geometry()));

        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());
        service.plan_trip(&sample_request()).await.unwrap();
        let planned = service.snapshot();

        // A fresh service over the same store sees the identical state
        let restored = TripService::new(Arc::new(MockRoutingPort::new()), store);
        restored.hydrate().await;
        assert_eq!(restored.snapshot(), planned);
    }

    #[tokio::test]
    async fn hydrate_treats_malformed_slices_as_absent() {
        let store = Arc::new(MemoryTripStore::default());
        store
            .save_slice(
                TripSlice::VehicleDetails,
                r#"{"make":"Tesla","model":"Model 3","best_range_km":465.0,"image_url":null}"#
                    .to_string(),
            )
            .await
            .unwrap();
        store
            .save_slice(TripSlice::RouteInfo, "{broken".to_string())
            .await
            .unwrap();

        let service = TripService::new(Arc::new(MockRoutingPort::new()), store);
        service.hydrate().await;

        let state = service.snapshot();
        assert!(state.vehicle.is_some());
        assert!(state.route.is_none());
        assert!(state.map.is_empty());
    }

    #[tokio::test]
    async fn hydrate_survives_a_broken_store() {
        let service = TripService::new(Arc::new(MockRoutingPort::new()), Arc::new(BrokenTripStore));
        service.hydrate().await;
        assert_eq!(service.snapshot(), TripState::default());
    }

    /// Routing double whose first stage blocks until released
    struct BlockingRouting {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl RoutingPort for BlockingRouting {
        async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn fetch_vehicle(&self, _: &str) -> Result<VehicleFetch, ApplicationError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(sample_fetch())
        }

        async fn compute_route(&self, _: &TripRequest) -> Result<RoutePlan, ApplicationError> {
            Ok(sample_plan_with_geometry())
        }

        async fn estimate_charging(
            &self,
            _: &str,
            _: f64,
        ) -> Result<ChargingEstimate, ApplicationError> {
            Ok(ChargingEstimate {
                charging_hours: None,
                price: None,
            })
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn overlapping_submission_is_rejected_while_the_first_completes() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let routing = BlockingRouting {
            entered: entered.clone(),
            release: release.clone(),
        };

        let service = Arc::new(TripService::new(
            Arc::new(routing),
            Arc::new(MemoryTripStore::default()),
        ));

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.plan_trip(&sample_request()).await })
        };

        // Wait until the first plan is inside stage one
        entered.notified().await;
        assert!(service.is_loading());

        let err = service.plan_trip(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::SubmissionInFlight));

        release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.route.station_count, Some(2));
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        // Mocks with no expectations panic on any call
        let routing = MockRoutingPort::new();
        let store = Arc::new(MemoryTripStore::default());
        let service = service_with(routing, store.clone());

        let mut form = TripForm::new();
        form.set_origin("Paris");

        let rejection = form.try_submit(service.is_loading()).unwrap_err();
        assert!(matches!(rejection, FormRejection::Invalid(_)));

        // Nothing was planned and nothing was stored
        assert_eq!(service.snapshot(), TripState::default());
        assert!(store.slices.lock().is_empty());
    }

    #[tokio::test]
    async fn estimate_charging_passes_through() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_estimate_charging()
            .withf(|vehicle, distance| vehicle == "veh-1" && (*distance - 465.2).abs() < 0.01)
            .returning(|_, _| {
                Ok(ChargingEstimate {
                    charging_hours: Some(1.2),
                    price: Some(14.8),
                })
            });

        let service = service_with(routing, Arc::new(MemoryTripStore::default()));
        let estimate = service.estimate_charging("veh-1", 465.2).await.unwrap();

        assert_eq!(estimate.charging_hours, Some(1.2));
        assert_eq!(estimate.price, Some(14.8));
        assert_eq!(service.snapshot(), TripState::default());
    }
}
