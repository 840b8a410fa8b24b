//! Integration tests for persistence layer using SQLite databases
//!
//! These tests verify the actual trip store used by the application,
//! including the typed slice layer on top of it.

#![allow(clippy::expect_used, unused_imports)]

use std::sync::Arc;

use application::ports::{TripSlice, TripStoreExt, TripStorePort};
use domain::{ChargingStation, MapData, RouteEndpoint, RouteInfo, VehicleDetails};
use infrastructure::persistence::{ConnectionPool, SqliteTripStore, create_pool};
use infrastructure::StorageConfig;

// ============================================================================
// Test Helpers
// ============================================================================

fn memory_store() -> SqliteTripStore {
    let config = StorageConfig {
        database_path: ":memory:".to_string(),
        max_connections: 1,
        run_migrations: true,
    };
    let pool = create_pool(&config).expect("Failed to create in-memory pool");
    SqliteTripStore::new(Arc::new(pool))
}

fn sample_vehicle() -> VehicleDetails {
    VehicleDetails::new("Tesla", "Model 3")
        .with_range(465.2)
        .with_image_url("https://cars.example/model3.png")
}

fn sample_map() -> MapData {
    MapData {
        route: Some(vec![[48.8566, 2.3522], [45.764, 4.8357]]),
        stations: Some(vec![
            ChargingStation::new("Ionity Mâcon")
                .with_position(46.3, 4.8)
                .with_address("Aire de Mâcon, A6"),
        ]),
        start: Some(RouteEndpoint::new("Paris", 48.8566, 2.3522)),
        end: Some(RouteEndpoint::new("Lyon", 45.764, 4.8357)),
    }
}

// ============================================================================
// Trip Store Tests
// ============================================================================

mod trip_store_tests {
    use super::*;

    #[tokio::test]
    async fn typed_vehicle_slice_round_trips() {
        let store = memory_store();
        let vehicle = sample_vehicle();

        store.save_vehicle(&vehicle).await.expect("Failed to save");

        let loaded = store.load_vehicle().await.expect("Failed to load");
        assert_eq!(loaded, Some(vehicle));
    }

    #[tokio::test]
    async fn typed_route_slice_round_trips() {
        let store = memory_store();
        let route = RouteInfo {
            distance_km: Some(465.2),
            duration_hours: Some(4.5),
            price: Some(18.3),
            station_count: Some(2),
            charging_minutes: Some(42.0),
        };

        store.save_route(&route).await.expect("Failed to save");

        let loaded = store.load_route().await.expect("Failed to load");
        assert_eq!(loaded, Some(route));
    }

    #[tokio::test]
    async fn typed_map_slice_round_trips() {
        let store = memory_store();
        let map = sample_map();

        store.save_map(&map).await.expect("Failed to save");

        let loaded = store.load_map().await.expect("Failed to load");
        assert_eq!(loaded, Some(map));
    }

    #[tokio::test]
    async fn missing_slices_load_as_none() {
        let store = memory_store();

        assert!(store.load_vehicle().await.expect("query").is_none());
        assert!(store.load_route().await.expect("query").is_none());
        assert!(store.load_map().await.expect("query").is_none());
    }

    #[tokio::test]
    async fn malformed_slice_loads_as_none() {
        let store = memory_store();
        store
            .save_slice(TripSlice::VehicleDetails, "not json at all".to_string())
            .await
            .expect("Failed to save raw");

        let loaded = store.load_vehicle().await.expect("Failed to load");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn saving_twice_keeps_the_latest_value() {
        let store = memory_store();

        store
            .save_vehicle(&VehicleDetails::new("Renault", "Zoe"))
            .await
            .expect("first save");
        store
            .save_vehicle(&sample_vehicle())
            .await
            .expect("second save");

        let loaded = store.load_vehicle().await.expect("load").expect("present");
        assert_eq!(loaded.display_name(), "Tesla Model 3");
    }
}

// ============================================================================
// On-Disk Persistence Tests
// ============================================================================

mod reopen_tests {
    use super::*;

    #[tokio::test]
    async fn slices_survive_a_pool_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig {
            database_path: dir
                .path()
                .join("voltroute.db")
                .to_string_lossy()
                .into_owned(),
            max_connections: 2,
            run_migrations: true,
        };

        {
            let pool = create_pool(&config).expect("first open");
            let store = SqliteTripStore::new(Arc::new(pool));
            store.save_vehicle(&sample_vehicle()).await.expect("save");
            store.save_map(&sample_map()).await.expect("save");
        }

        let pool = create_pool(&config).expect("reopen");
        let store = SqliteTripStore::new(Arc::new(pool));

        let vehicle = store.load_vehicle().await.expect("load").expect("present");
        assert_eq!(vehicle.display_name(), "Tesla Model 3");

        let map = store.load_map().await.expect("load").expect("present");
        assert_eq!(map.stations.map(|s| s.len()), Some(1));
    }
}
