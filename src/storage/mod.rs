// ABOUTME: Key-value storage abstraction for on-device persistence
// ABOUTME: Pluggable string store (in-memory, SQLite) underneath the local favorites store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// In-memory key-value store
pub mod memory;
/// SQLite-backed key-value store
pub mod sqlite;

use crate::errors::AppResult;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// String key-value storage with per-key atomic writes
///
/// # Examples
///
/// ```rust,no_run
/// use mealbook::storage::{KeyValueStore, MemoryKeyValueStore};
/// # async fn example() -> Result<(), mealbook::errors::AppError> {
/// let store = MemoryKeyValueStore::new();
/// store.set_item("@favorites_user_1", "[]").await?;
/// assert_eq!(store.get_item("@favorites_user_1").await?.as_deref(), Some("[]"));
/// store.remove_item("@favorites_user_1").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` when never written or removed
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written
    async fn remove_item(&self, key: &str) -> AppResult<()>;
}
