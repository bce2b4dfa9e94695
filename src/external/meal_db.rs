// ABOUTME: TheMealDB API client for recipe search, lookup, random sampling and category browsing
// ABOUTME: One GET per call, envelope decoding and explicit error results
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! `TheMealDB` API client
//!
//! The API is free and public. Responses wrap their payload in a `meals` or
//! `categories` key which is `null` or absent when there is nothing to return;
//! that case is an empty success, not an error.
//!
//! # API Reference
//! <https://www.themealdb.com/api.php>

use crate::config::MealApiConfig;
use crate::constants::meal_api::{
    CATEGORIES_PATH, DEFAULT_BASE_URL, FILTER_PATH, LOOKUP_PATH, RANDOM_PATH, SEARCH_PATH,
    SERVICE_NAME,
};
use crate::errors::{AppError, AppResult};
use crate::external::http_client::shared_client;
use crate::logging::AppLogger;
use crate::models::{MealCategory, RawMeal};
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Read-only source of raw meal data
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Meals whose name contains `query`. Blank queries return nothing without a request.
    async fn search_by_name(&self, query: &str) -> AppResult<Vec<RawMeal>>;

    /// Full meal record by id
    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<RawMeal>>;

    /// One random full meal record
    async fn random_meal(&self) -> AppResult<Option<RawMeal>>;

    /// `count` concurrent random meals. Failed or empty draws are dropped;
    /// duplicates are possible.
    async fn random_meals(&self, count: usize) -> Vec<RawMeal> {
        let draws = join_all((0..count).map(|_| self.random_meal())).await;

        draws
            .into_iter()
            .filter_map(|draw| match draw {
                Ok(meal) => meal,
                Err(e) => {
                    warn!(error = %e, "Dropping failed random meal draw");
                    None
                }
            })
            .collect()
    }

    /// All meal categories
    async fn categories(&self) -> AppResult<Vec<MealCategory>>;

    /// Partial meal records (`idMeal`, `strMeal`, `strMealThumb`) in a category
    async fn filter_by_category(&self, category: &str) -> AppResult<Vec<RawMeal>>;

    /// Partial meal records using a main ingredient
    async fn filter_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<RawMeal>>;
}

/// Meal API client configuration
#[derive(Debug, Clone)]
pub struct MealDbClientConfig {
    /// Base URL, without trailing slash (default: <https://www.themealdb.com/api/json/v1/1>)
    pub base_url: String,
}

impl Default for MealDbClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl From<&MealApiConfig> for MealDbClientConfig {
    fn from(config: &MealApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }
}

/// `{"meals": [...] | null}`
#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<RawMeal>>,
}

/// `{"categories": [...] | null}`
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<MealCategory>>,
}

/// HTTP client for `TheMealDB`
#[derive(Clone)]
pub struct MealDbClient {
    config: MealDbClientConfig,
    client: Client,
}

impl MealDbClient {
    /// Create a client on the shared connection pool
    #[must_use]
    pub fn new(config: MealDbClientConfig) -> Self {
        Self {
            config,
            client: shared_client().clone(),
        }
    }

    /// Create a client with a caller-provided `reqwest` client
    #[must_use]
    pub const fn with_client(config: MealDbClientConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/{path}", self.config.base_url);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = path, error = %e, "Meal API request failed");
                if e.is_connect() || e.is_timeout() {
                    AppError::external_unavailable(SERVICE_NAME, e.to_string())
                } else {
                    AppError::external_service(SERVICE_NAME, e.to_string())
                }
            })?;

        let status = response.status();
        AppLogger::log_external_request(
            SERVICE_NAME,
            path,
            status.as_u16(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        if !status.is_success() {
            warn!(endpoint = path, status = %status, "Meal API returned an error status");
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("{path} returned status {status}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            warn!(endpoint = path, error = %e, "Failed to parse meal API response");
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })
    }

    async fn get_meals(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Vec<RawMeal>> {
        let envelope: MealsEnvelope = self.get_json(path, query).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn search_by_name(&self, query: &str) -> AppResult<Vec<RawMeal>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Skipping meal search for blank query");
            return Ok(Vec::new());
        }
        self.get_meals(SEARCH_PATH, &[("s", query)]).await
    }

    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<RawMeal>> {
        let meals = self.get_meals(LOOKUP_PATH, &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    async fn random_meal(&self) -> AppResult<Option<RawMeal>> {
        let meals = self.get_meals(RANDOM_PATH, &[]).await?;
        Ok(meals.into_iter().next())
    }

    async fn categories(&self) -> AppResult<Vec<MealCategory>> {
        let envelope: CategoriesEnvelope = self.get_json(CATEGORIES_PATH, &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    async fn filter_by_category(&self, category: &str) -> AppResult<Vec<RawMeal>> {
        self.get_meals(FILTER_PATH, &[("c", category)]).await
    }

    async fn filter_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<RawMeal>> {
        self.get_meals(FILTER_PATH, &[("i", ingredient)]).await
    }
}
