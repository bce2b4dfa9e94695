// ABOUTME: Composition context wiring the meal client, catalog and the configured favorites store
// ABOUTME: Hands out per-user favorites controllers and search sessions to the view layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dependency composition
//!
//! One [`MealbookContext`] is built per application instance. It owns exactly
//! one favorites store, chosen by configuration.

use crate::config::{AppConfig, RefreshPolicy};
use crate::errors::AppResult;
use crate::external::http_client::initialize_shared_client;
use crate::external::{MealDbClient, MealDbClientConfig, MealSource};
use crate::favorites::{create_store, FavoritesController, FavoritesStore};
use crate::models::UserId;
use crate::services::{RecipeCatalog, SearchSession};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Application-wide dependencies
#[derive(Clone)]
pub struct MealbookContext {
    catalog: RecipeCatalog,
    favorites: Arc<dyn FavoritesStore>,
    refresh_policy: RefreshPolicy,
    search_debounce: Duration,
}

impl MealbookContext {
    /// Create a context from already-built parts
    #[must_use]
    pub fn new(
        meal_source: Arc<dyn MealSource>,
        favorites: Arc<dyn FavoritesStore>,
        refresh_policy: RefreshPolicy,
        search_debounce: Duration,
    ) -> Self {
        Self {
            catalog: RecipeCatalog::new(meal_source),
            favorites,
            refresh_policy,
            search_debounce,
        }
    }

    /// Build the meal client and the configured favorites store
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites store cannot be opened
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        info!("{}", config.summary());

        initialize_shared_client(
            config.meal_api.timeout_secs,
            config.meal_api.connect_timeout_secs,
        );
        let meal_source: Arc<dyn MealSource> = Arc::new(MealDbClient::new(
            MealDbClientConfig::from(&config.meal_api),
        ));
        let favorites = create_store(&config.favorites).await?;

        Ok(Self::new(
            meal_source,
            favorites,
            config.favorites.refresh_policy,
            config.search.debounce,
        ))
    }

    /// Recipe catalog
    #[must_use]
    pub const fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// The single favorites store of this context
    #[must_use]
    pub const fn favorites_store(&self) -> &Arc<dyn FavoritesStore> {
        &self.favorites
    }

    /// Favorites controller for `user`, or for no one until [`FavoritesController::set_user`]
    #[must_use]
    pub fn favorites_for(&self, user: Option<UserId>) -> FavoritesController {
        FavoritesController::new(Arc::clone(&self.favorites), user, self.refresh_policy)
    }

    /// Fresh debounced search session
    #[must_use]
    pub fn search_session(&self) -> SearchSession {
        SearchSession::with_debounce(self.catalog.clone(), self.search_debounce)
    }
}
