//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod routing_port;
mod trip_store;

#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{ChargingEstimate, RoutePlan, RoutingPort, VehicleFetch};
#[cfg(test)]
pub use trip_store::MockTripStorePort;
pub use trip_store::{TripSlice, TripStoreExt, TripStorePort};
