//! Charging trip backend integration for voltroute
//!
//! Talks to the trip planning REST backend: vehicle catalog, per-vehicle
//! details, route computation with charging stops, and standalone charging
//! cost estimates.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`ChargingApiClient`] defines
//! the interface for catalog, vehicle, route, and estimate calls,
//! implemented by [`HttpChargingClient`] over the backend's JSON API.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_charging::{ChargingApiConfig, HttpChargingClient};
//!
//! let config = ChargingApiConfig::default();
//! let client = HttpChargingClient::new(&config)?;
//!
//! let vehicles = client.list_vehicles().await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{ChargingApiClient, HttpChargingClient};
pub use config::ChargingApiConfig;
pub use error::ChargingApiError;
pub use models::{ChargingQuote, RouteAnswer, RouteMark, StationStop, VehicleData, VehicleListing};
