//! Persistence module
//!
//! SQLite-based storage for the trip slices restored at startup.

pub mod connection;
pub mod migrations;
pub mod trip_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use trip_store::SqliteTripStore;
