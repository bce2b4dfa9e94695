// ABOUTME: SQLite-backed key-value store for durable on-device persistence
// ABOUTME: Single kv_store table with upsert writes through an sqlx pool
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::KeyValueStore;
use crate::database::connect_pool;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Durable key-value store in a SQLite file
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Open (creating if missing) the database at `database_url` and migrate it
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let store = Self::new(connect_pool(database_url).await?);
        store.migrate().await?;
        debug!(database_url, "Opened key-value store");
        Ok(store)
    }

    /// Wrap an existing pool. Call [`Self::migrate`] before use.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `kv_store` table
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create kv_store table: {e}")))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage(format!("Failed to read key {key}: {e}")))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| AppError::storage(format!("Failed to decode value for {key}: {e}")))
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write key {key}: {e}")))?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage(format!("Failed to remove key {key}: {e}")))?;

        Ok(())
    }
}
