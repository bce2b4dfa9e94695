// ABOUTME: Favorites persistence capability with local and remote implementations
// ABOUTME: Store trait, backend factory and the per-session favorites controller
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Per-user favorites
//!
//! A [`FavoritesStore`] owns the persisted collection. Exactly one backend is
//! built per composition by [`factory::create_store`]; the
//! [`FavoritesController`] keeps an in-memory mirror for one signed-in user.

/// Session-scoped favorites cache
pub mod controller;
/// Backend selection
pub mod factory;
/// Key-value backed store
pub mod local;
/// REST backed store
pub mod remote;

pub use controller::FavoritesController;
pub use factory::create_store;
pub use local::LocalFavoritesStore;
pub use remote::RemoteFavoritesStore;

use crate::errors::AppResult;
use crate::models::{FavoriteToggle, Recipe, UserId};
use async_trait::async_trait;
use tracing::debug;

/// Per-user favorites collection, unique by recipe id
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// The user's favorites in insertion order. A user with no favorites gets an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, user: &UserId) -> AppResult<Vec<Recipe>>;

    /// Append `recipe`. Returns `false` and leaves the collection unchanged when
    /// a favorite with the same id is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written
    async fn add(&self, user: &UserId, recipe: &Recipe) -> AppResult<bool>;

    /// Remove the favorite with `recipe_id`. Removing an absent id succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written
    async fn remove(&self, user: &UserId, recipe_id: &str) -> AppResult<()>;

    /// Whether `recipe_id` is in the user's collection
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn is_favorite(&self, user: &UserId, recipe_id: &str) -> AppResult<bool> {
        Ok(self
            .get(user)
            .await?
            .iter()
            .any(|recipe| recipe.id == recipe_id))
    }

    /// Remove `recipe` if present, add it otherwise.
    ///
    /// Check-then-act: two concurrent toggles for the same user may race.
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying call fails
    async fn toggle(&self, user: &UserId, recipe: &Recipe) -> AppResult<FavoriteToggle> {
        if self.is_favorite(user, &recipe.id).await? {
            self.remove(user, &recipe.id).await?;
            return Ok(FavoriteToggle::Removed);
        }

        if self.add(user, recipe).await? {
            return Ok(FavoriteToggle::Added);
        }
        debug!(
            backend = self.backend_name(),
            recipe_id = %recipe.id,
            "Toggle found the recipe already present on add"
        );
        Ok(FavoriteToggle::AlreadyPresent)
    }
}
