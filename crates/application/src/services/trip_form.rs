//! Trip form controller
//!
//! Owns the submission inputs and the vehicle catalog. Network state stays
//! with the orchestrator; the form only sees the loading flag at the moment
//! a submission is attempted, and an invalid form never produces a request
//! at all.

use domain::{DomainError, TripRequest, VehicleSummary};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::ports::RoutingPort;

/// Why a submission attempt was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormRejection {
    /// A previous submission is still running
    #[error("A trip is already being planned")]
    Busy,

    /// Input validation failed; the message is user-facing
    #[error("{0}")]
    Invalid(String),
}

/// Controller for the trip submission form
///
/// Two states, idle and submitting, driven externally by the orchestrator's
/// loading flag.
#[derive(Debug, Default)]
pub struct TripForm {
    vehicle_id: String,
    origin: String,
    destination: String,
    vehicles: Vec<VehicleSummary>,
    catalog_error: Option<String>,
    validation_error: Option<String>,
}

impl TripForm {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the vehicle catalog, once at startup
    ///
    /// A failure is recorded as a user-visible message and the form stays
    /// usable with an empty catalog.
    #[instrument(skip(self, routing))]
    pub async fn load_catalog(&mut self, routing: &dyn RoutingPort) {
        match routing.list_vehicles().await {
            Ok(vehicles) => {
                debug!(count = vehicles.len(), "Vehicle catalog loaded");
                self.vehicles = vehicles;
                self.catalog_error = None;
            },
            Err(e) => {
                warn!(error = %e, "Failed to load vehicle catalog");
                self.catalog_error = Some("Could not load the vehicle list".to_string());
            },
        }
    }

    /// Set the chosen vehicle id
    pub fn set_vehicle_id(&mut self, vehicle_id: impl Into<String>) {
        self.vehicle_id = vehicle_id.into();
    }

    /// Set the departure city
    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = origin.into();
    }

    /// Set the arrival city
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    /// The loaded vehicle catalog
    #[must_use]
    pub fn vehicles(&self) -> &[VehicleSummary] {
        &self.vehicles
    }

    /// Find a catalog entry by vehicle id
    #[must_use]
    pub fn find_vehicle(&self, vehicle_id: &str) -> Option<&VehicleSummary> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    /// Message shown when the catalog could not be loaded
    #[must_use]
    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    /// Message shown after a rejected submission
    #[must_use]
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Validate the inputs and produce a submission
    ///
    /// `submitting` is the orchestrator's loading flag; while it is set the
    /// form refuses to produce another request. On invalid input the
    /// user-visible message is stored and shown until the next submission
    /// validates.
    ///
    /// # Errors
    ///
    /// Returns `FormRejection::Busy` while a submission is in flight, or
    /// `FormRejection::Invalid` when a field is empty.
    pub fn try_submit(&mut self, submitting: bool) -> Result<TripRequest, FormRejection> {
        if submitting {
            return Err(FormRejection::Busy);
        }

        match TripRequest::new(&self.vehicle_id, &self.origin, &self.destination) {
            Ok(request) => {
                self.validation_error = None;
                Ok(request)
            },
            Err(e) => {
                let message = match e {
                    DomainError::ValidationError(message) => message,
                    other => other.to_string(),
                };
                self.validation_error = Some(message.clone());
                Err(FormRejection::Invalid(message))
            },
        }
    }
}
