// ABOUTME: On-device favorites store over the key-value storage layer
// ABOUTME: One JSON list of full recipe records per user-scoped key
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::FavoritesStore;
use crate::constants::favorites::storage_key;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, UserId};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Favorites persisted as `@favorites_<userId>` → JSON array of recipes
#[derive(Clone)]
pub struct LocalFavoritesStore {
    storage: Arc<dyn KeyValueStore>,
}

impl LocalFavoritesStore {
    /// Create a store over any key-value backend
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    async fn read(&self, user: &UserId) -> AppResult<Vec<Recipe>> {
        let key = storage_key(user.as_str());
        let Some(json) = self.storage.get_item(&key).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&json).map_err(|e| {
            warn!(user_id = %user, error = %e, "Stored favorites are not a valid recipe list");
            AppError::serialization(format!("Corrupt favorites list for user {user}: {e}"))
                .with_user_id(user.as_str())
        })
    }

    async fn write(&self, user: &UserId, favorites: &[Recipe]) -> AppResult<()> {
        let json = serde_json::to_string(favorites)?;
        self.storage
            .set_item(&storage_key(user.as_str()), &json)
            .await
    }
}

#[async_trait]
impl FavoritesStore for LocalFavoritesStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn get(&self, user: &UserId) -> AppResult<Vec<Recipe>> {
        self.read(user).await
    }

    async fn add(&self, user: &UserId, recipe: &Recipe) -> AppResult<bool> {
        let mut favorites = self.read(user).await?;
        if favorites.iter().any(|existing| existing.id == recipe.id) {
            debug!(user_id = %user, recipe_id = %recipe.id, "Recipe already in favorites");
            return Ok(false);
        }

        favorites.push(recipe.clone());
        self.write(user, &favorites).await?;
        Ok(true)
    }

    async fn remove(&self, user: &UserId, recipe_id: &str) -> AppResult<()> {
        let mut favorites = self.read(user).await?;
        favorites.retain(|recipe| recipe.id != recipe_id);
        self.write(user, &favorites).await
    }
}
