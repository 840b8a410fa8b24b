//! Domain layer for voltroute
//!
//! Contains the trip-planning data model, value objects, and domain errors.
//! This layer has no external service dependencies and defines the
//! ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
