//! Domain entities - Objects describing a planned trip

mod map;
mod route;
mod vehicle;

pub use map::{ChargingStation, MapData, Polyline, RouteEndpoint};
pub use route::RouteInfo;
pub use vehicle::{VehicleDetails, VehicleSummary};
