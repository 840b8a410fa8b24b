//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod trip_request;

pub use geo_point::GeoPoint;
pub use trip_request::TripRequest;
