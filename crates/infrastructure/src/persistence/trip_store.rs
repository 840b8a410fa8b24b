//! SQLite-based trip slice persistence

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{TripSlice, TripStorePort},
};
use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based trip store
///
/// Each slice is a single row keyed by its slice name. Writing a slice
/// replaces the previous value wholesale.
#[derive(Debug, Clone)]
pub struct SqliteTripStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteTripStore {
    /// Create a new SQLite trip store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripStorePort for SqliteTripStore {
    #[instrument(skip(self), fields(slice = slice.key()))]
    async fn load_slice(&self, slice: TripSlice) -> Result<Option<String>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            let value = conn
                .query_row(
                    "SELECT value FROM trip_state WHERE slice = ?1",
                    [slice.key()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            Ok(value)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, value), fields(slice = slice.key()))]
    async fn save_slice(&self, slice: TripSlice, value: String) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            conn.execute(
                "INSERT INTO trip_state (slice, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(slice) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![slice.key(), value],
            )
            .map_err(|e| ApplicationError::Persistence(e.to_string()))?;

            debug!("Saved trip slice");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
