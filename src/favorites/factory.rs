// ABOUTME: Favorites store factory for configuration-based backend selection
// ABOUTME: Builds exactly one store, local key-value or remote REST, per composition
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{FavoritesStore, LocalFavoritesStore, RemoteFavoritesStore};
use crate::config::{FavoritesBackend, FavoritesConfig};
use crate::errors::AppResult;
use crate::storage::SqliteKeyValueStore;
use std::sync::Arc;
use tracing::info;

/// Create the configured favorites store
///
/// # Errors
///
/// Returns an error if the local database cannot be opened
pub async fn create_store(config: &FavoritesConfig) -> AppResult<Arc<dyn FavoritesStore>> {
    match &config.backend {
        FavoritesBackend::Local { database_url } => {
            info!("Initializing local favorites store ({database_url})");
            let storage = SqliteKeyValueStore::connect(database_url).await?;
            Ok(Arc::new(LocalFavoritesStore::new(Arc::new(storage))))
        }
        FavoritesBackend::Remote {
            base_url,
            timeout_secs,
        } => {
            info!("Initializing remote favorites store ({base_url})");
            Ok(Arc::new(RemoteFavoritesStore::new(base_url, *timeout_secs)))
        }
    }
}
