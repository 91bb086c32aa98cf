//! SQLite key-value store implementation
//!
//! Implements the KeyValueStorePort using SQLite.

use std::sync::Arc;

use application::{error::ApplicationError, ports::KeyValueStorePort};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based key-value store
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteKeyValueStore {
    /// Create a new SQLite key-value store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn persistence_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Persistence(e.to_string())
}

#[async_trait]
impl KeyValueStorePort for SqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = key.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(persistence_error)?;

            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                [&key],
                |row| row.get(0),
            )
            .optional()
            .map_err(persistence_error)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(persistence_error)?;

            conn.execute(
                "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(persistence_error)?;

            debug!("Stored value");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
