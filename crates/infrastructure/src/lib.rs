//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the backend API adapter, SQLite persistence, configuration
//! loading, and the map page template engine.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod templates;

pub use adapters::ChargingApiAdapter;
pub use config::{AppConfig, ChargingAppConfig, MapAppConfig, StorageConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteTripStore, create_pool};
pub use templates::{
    MapRenderOptions, MapScene, MarkerIcon, MarkerIconSet, SummaryLine, SummaryPanel,
    TemplateEngine, TemplateError, format_quantity,
};
