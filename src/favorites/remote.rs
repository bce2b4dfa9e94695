// ABOUTME: Favorites store backed by the favorites REST service
// ABOUTME: GET list, POST create and DELETE by user and recipe id, reduced record shape
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::FavoritesStore;
use crate::constants::favorites::{API_PATH, SERVICE_NAME};
use crate::constants::meal_api::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::errors::{AppError, AppResult};
use crate::external::http_client::build_client;
use crate::logging::AppLogger;
use crate::models::{FavoriteRecord, Recipe, UserId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::warn;

const FETCH_FAILED: &str = "Failed to fetch favorites";
const ADD_FAILED: &str = "Failed to add favorite";
const REMOVE_FAILED: &str = "Failed to remove favorite";

/// REST client for the favorites backend.
///
/// The backend only keeps id, title, image, cook time and servings, so recipes
/// read back have empty detail fields.
#[derive(Clone)]
pub struct RemoteFavoritesStore {
    base_url: String,
    client: Client,
}

impl RemoteFavoritesStore {
    /// Create a store for the backend at `base_url`
    #[must_use]
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self::with_client(
            base_url,
            build_client(timeout_secs, timeout_secs.min(DEFAULT_CONNECT_TIMEOUT_SECS)),
        )
    }

    /// Create a store with a caller-provided `reqwest` client
    #[must_use]
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{API_PATH}", self.base_url)
    }

    fn user_url(&self, user: &UserId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(user.as_str())
        )
    }

    fn favorite_url(&self, user: &UserId, recipe_id: &str) -> String {
        format!("{}/{}", self.user_url(user), urlencoding::encode(recipe_id))
    }

    /// Log the underlying cause and return the generic per-operation error
    fn failure(operation: &'static str, user: &UserId, cause: &dyn std::fmt::Display) -> AppError {
        warn!(user_id = %user, cause = %cause, "{operation}");
        AppError::external_service(SERVICE_NAME, operation).with_user_id(user.as_str())
    }

    fn log_request(endpoint: &str, status: StatusCode, started: Instant) {
        AppLogger::log_external_request(
            SERVICE_NAME,
            endpoint,
            status.as_u16(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
    }
}

#[async_trait]
impl FavoritesStore for RemoteFavoritesStore {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    async fn get(&self, user: &UserId) -> AppResult<Vec<Recipe>> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.user_url(user))
            .send()
            .await
            .map_err(|e| Self::failure(FETCH_FAILED, user, &e))?;

        let status = response.status();
        Self::log_request("GET /api/favorites/:userId", status, started);

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Self::failure(FETCH_FAILED, user, &status));
        }

        let records: Vec<FavoriteRecord> = response
            .json()
            .await
            .map_err(|e| Self::failure(FETCH_FAILED, user, &e))?;

        Ok(records.into_iter().map(Recipe::from_record).collect())
    }

    async fn add(&self, user: &UserId, recipe: &Recipe) -> AppResult<bool> {
        let started = Instant::now();
        let response = self
            .client
            .post(self.collection_url())
            .json(&recipe.summary(user))
            .send()
            .await
            .map_err(|e| Self::failure(ADD_FAILED, user, &e))?;

        let status = response.status();
        Self::log_request("POST /api/favorites", status, started);

        match status {
            StatusCode::CONFLICT => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Self::failure(ADD_FAILED, user, &status)),
        }
    }

    async fn remove(&self, user: &UserId, recipe_id: &str) -> AppResult<()> {
        let started = Instant::now();
        let response = self
            .client
            .delete(self.favorite_url(user, recipe_id))
            .send()
            .await
            .map_err(|e| Self::failure(REMOVE_FAILED, user, &e))?;

        let status = response.status();
        Self::log_request("DELETE /api/favorites/:userId/:recipeId", status, started);

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::failure(REMOVE_FAILED, user, &status))
        }
    }
}
