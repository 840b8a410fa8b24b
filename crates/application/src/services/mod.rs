//! Application services - Use case implementations

mod trip_form;
mod trip_service;

pub use trip_form::{FormRejection, TripForm};
pub use trip_service::{TripOutcome, TripService, TripState};
