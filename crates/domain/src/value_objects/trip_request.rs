//! Trip request value object with validation
//!
//! A submission is only constructible when the vehicle, origin, and
//! destination are all filled in, so everything past the form boundary can
//! rely on complete input.
//!
//! # Examples
//!
//! ```
//! use domain::TripRequest;
//!
//! let request = TripRequest::new("5f043aa8bc262f1627fc032b", "Paris", "Lyon").unwrap();
//! assert_eq!(request.origin(), "Paris");
//!
//! // Blank fields are rejected
//! assert!(TripRequest::new("", "Paris", "Lyon").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Message shown when any of the three fields is missing
const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// A validated trip submission: chosen vehicle plus origin and destination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct TripRequest {
    #[validate(length(min = 1))]
    vehicle_id: String,
    #[validate(length(min = 1))]
    origin: String,
    #[validate(length(min = 1))]
    destination: String,
}

impl TripRequest {
    /// Create a new trip request, requiring all three fields to be non-empty
    /// after trimming
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` with a user-facing message if
    /// any field is empty.
    pub fn new(
        vehicle_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let candidate = Self {
            vehicle_id: vehicle_id.into().trim().to_string(),
            origin: origin.into().trim().to_string(),
            destination: destination.into().trim().to_string(),
        };

        candidate
            .validate()
            .map_err(|_| DomainError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()))?;

        Ok(candidate)
    }

    /// Identifier of the chosen vehicle
    #[must_use]
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Departure city as entered
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Arrival city as entered
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl fmt::Display for TripRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.origin, self.destination, self.vehicle_id
        )
    }
}
