//! Trip store port definition
//!
//! Defines the interface for the persisted trip slices. Implementations may
//! keep them in SQLite or in memory; values are stored as JSON strings and
//! the typed layer handles serialization.

use async_trait::async_trait;
use domain::{MapData, RouteInfo, VehicleDetails};
#[cfg(test)]
use mockall::automock;
use tracing::warn;

use crate::error::ApplicationError;

/// The three independently persisted trip slices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripSlice {
    /// Details of the last fetched vehicle
    VehicleDetails,
    /// Last merged route summary
    RouteInfo,
    /// Last committed map geometry
    MapData,
}

impl TripSlice {
    /// All slices, in hydration order
    pub const ALL: [Self; 3] = [Self::VehicleDetails, Self::RouteInfo, Self::MapData];

    /// Storage key for this slice
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::VehicleDetails => "vehicle_details",
            Self::RouteInfo => "route_info",
            Self::MapData => "map_data",
        }
    }
}

/// Port for persisting trip slices between runs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripStorePort: Send + Sync {
    /// Load the raw stored value for a slice
    ///
    /// Returns `None` if the slice has never been saved.
    async fn load_slice(&self, slice: TripSlice) -> Result<Option<String>, ApplicationError>;

    /// Save the raw value for a slice, replacing any previous one
    async fn save_slice(&self, slice: TripSlice, value: String) -> Result<(), ApplicationError>;
}

/// Extension trait for typed slice access
///
/// Loading treats a value that fails to deserialize the same as a missing
/// one: stale or hand-edited data must never break startup.
#[async_trait]
pub trait TripStoreExt: TripStorePort {
    /// Load the persisted vehicle details
    async fn load_vehicle(&self) -> Result<Option<VehicleDetails>, ApplicationError> {
        self.load_decoded(TripSlice::VehicleDetails).await
    }

    /// Persist the vehicle details slice
    async fn save_vehicle(&self, details: &VehicleDetails) -> Result<(), ApplicationError> {
        self.save_encoded(TripSlice::VehicleDetails, details).await
    }

    /// Load the persisted route summary
    async fn load_route(&self) -> Result<Option<RouteInfo>, ApplicationError> {
        self.load_decoded(TripSlice::RouteInfo).await
    }

    /// Persist the route summary slice
    async fn save_route(&self, route: &RouteInfo) -> Result<(), ApplicationError> {
        self.save_encoded(TripSlice::RouteInfo, route).await
    }

    /// Load the persisted map geometry
    async fn load_map(&self) -> Result<Option<MapData>, ApplicationError> {
        self.load_decoded(TripSlice::MapData).await
    }

    /// Persist the map geometry slice
    async fn save_map(&self, map: &MapData) -> Result<(), ApplicationError> {
        self.save_encoded(TripSlice::MapData, map).await
    }

    /// Load and decode a slice, mapping malformed data to `None`
    async fn load_decoded<T>(&self, slice: TripSlice) -> Result<Option<T>, ApplicationError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.load_slice(slice).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(slice = slice.key(), error = %e, "Discarding malformed stored slice");
                    Ok(None)
                },
            },
            None => Ok(None),
        }
    }

    /// Encode and save a slice
    async fn save_encoded<T>(&self, slice: TripSlice, value: &T) -> Result<(), ApplicationError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let raw = serde_json::to_string(value)
            .map_err(|e| ApplicationError::Internal(format!("Slice serialization error: {e}")))?;
        self.save_slice(slice, raw).await
    }
}

// Blanket implementation for all TripStorePort implementors
impl<T: TripStorePort + ?Sized> TripStoreExt for T {}
