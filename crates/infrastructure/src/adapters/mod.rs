//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod charging_api;

pub use charging_api::ChargingApiAdapter;
