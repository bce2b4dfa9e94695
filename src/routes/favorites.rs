// ABOUTME: Route handlers for the favorites REST API
// ABOUTME: List, create and delete per-user favorite rows
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Favorites routes
//!
//! The user id is taken verbatim from the path or body; identity is verified
//! upstream by the identity provider.

use crate::constants::recipe::{DEFAULT_COOK_TIME, DEFAULT_SERVINGS};
use crate::database::{FavoritesManager, NewFavorite};
use crate::errors::AppError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Body of `POST /api/favorites`. Only `userId` and `recipeId` are required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteBody {
    /// Owner
    pub user_id: Option<String>,
    /// Meal identifier
    pub recipe_id: Option<String>,
    /// Meal name
    pub title: Option<String>,
    /// Thumbnail URL
    pub image: Option<String>,
    /// Display cook time
    pub cook_time: Option<String>,
    /// Display servings
    pub servings: Option<u32>,
}

impl CreateFavoriteBody {
    /// Validate required fields and fill display defaults
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when `userId` or `recipeId` is absent or blank
    pub fn into_new_favorite(self) -> Result<NewFavorite, AppError> {
        let user_id = required(self.user_id, "userId")?;
        let recipe_id = required(self.recipe_id, "recipeId")?;

        Ok(NewFavorite {
            user_id,
            recipe_id,
            title: self.title.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            cook_time: self
                .cook_time
                .unwrap_or_else(|| DEFAULT_COOK_TIME.to_owned()),
            servings: self.servings.unwrap_or(DEFAULT_SERVINGS),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

/// Favorites routes handler
pub struct FavoritesRoutes;

impl FavoritesRoutes {
    /// Create all favorites routes
    pub fn routes(manager: Arc<FavoritesManager>) -> Router {
        Router::new()
            .route("/api/favorites", post(Self::handle_create))
            .route("/api/favorites/:user_id", get(Self::handle_list))
            .route(
                "/api/favorites/:user_id/:recipe_id",
                delete(Self::handle_delete),
            )
            .with_state(manager)
    }

    /// Handle GET /api/favorites/:user_id - List a user's favorites
    async fn handle_list(
        State(manager): State<Arc<FavoritesManager>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let favorites = manager.list(&user_id).await?;
        Ok((StatusCode::OK, Json(favorites)).into_response())
    }

    /// Handle POST /api/favorites - Add a favorite
    async fn handle_create(
        State(manager): State<Arc<FavoritesManager>>,
        Json(body): Json<CreateFavoriteBody>,
    ) -> Result<Response, AppError> {
        let favorite = body.into_new_favorite()?;

        let Some(created) = manager.create(&favorite).await? else {
            return Err(AppError::already_exists(format!(
                "Favorite {} for user {}",
                favorite.recipe_id, favorite.user_id
            )));
        };

        debug!(user_id = %created.user_id, recipe_id = %created.recipe_id, "Favorite created");
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }

    /// Handle DELETE /api/favorites/:user_id/:recipe_id - Remove a favorite (idempotent)
    async fn handle_delete(
        State(manager): State<Arc<FavoritesManager>>,
        Path((user_id, recipe_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let deleted = manager.delete(&user_id, &recipe_id).await?;
        debug!(user_id = %user_id, recipe_id = %recipe_id, deleted, "Favorite delete");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
