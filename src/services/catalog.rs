// ABOUTME: Recipe catalog service turning raw meal data into recipe records for browse screens
// ABOUTME: Search, detail lookup, category and ingredient listings, featured picks and the home feed
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::browse::{DEFAULT_RANDOM_COUNT, HOME_FEATURED_COUNT};
use crate::errors::AppResult;
use crate::external::MealSource;
use crate::models::{
    summarize_categories, transform_meal, transform_meals, CategorySummary, Recipe,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything the home screen renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeFeed {
    /// Numbered category list
    pub categories: Vec<CategorySummary>,
    /// First category, preselected
    pub selected_category: Option<String>,
    /// Partial recipes of the selected category
    pub recipes: Vec<Recipe>,
    /// First random meal
    pub featured: Option<Recipe>,
}

/// Recipe-level view over a [`MealSource`]
#[derive(Clone)]
pub struct RecipeCatalog {
    source: Arc<dyn MealSource>,
}

impl RecipeCatalog {
    /// Create a catalog over `source`
    #[must_use]
    pub fn new(source: Arc<dyn MealSource>) -> Self {
        Self { source }
    }

    /// Underlying meal source
    #[must_use]
    pub const fn source(&self) -> &Arc<dyn MealSource> {
        &self.source
    }

    /// Recipes whose name contains `query`. Blank queries return nothing without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the meal API request fails
    pub async fn search(&self, query: &str) -> AppResult<Vec<Recipe>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let meals = self.source.search_by_name(query.trim()).await?;
        debug!(query, results = meals.len(), "Recipe search completed");
        Ok(transform_meals(&meals))
    }

    /// Full recipe by id, `None` when the id is unknown
    ///
    /// # Errors
    ///
    /// Returns an error if the meal API request fails
    pub async fn recipe_detail(&self, id: &str) -> AppResult<Option<Recipe>> {
        let meal = self.source.lookup_by_id(id).await?;
        Ok(transform_meal(meal.as_ref()))
    }

    /// Numbered category list
    ///
    /// # Errors
    ///
    /// Returns an error if the meal API request fails
    pub async fn categories(&self) -> AppResult<Vec<CategorySummary>> {
        Ok(summarize_categories(&self.source.categories().await?))
    }

    /// Recipes in `category`. Ingredients and instructions are empty until the
    /// full record is loaded with [`Self::recipe_detail`].
    ///
    /// # Errors
    ///
    /// Returns an error if the meal API request fails
    pub async fn category_recipes(&self, category: &str) -> AppResult<Vec<Recipe>> {
        Ok(transform_meals(
            &self.source.filter_by_category(category).await?,
        ))
    }

    /// Recipes using `ingredient` as a main ingredient (partial records)
    ///
    /// # Errors
    ///
    /// Returns an error if the meal API request fails
    pub async fn ingredient_recipes(&self, ingredient: &str) -> AppResult<Vec<Recipe>> {
        Ok(transform_meals(
            &self.source.filter_by_ingredient(ingredient).await?,
        ))
    }

    /// Up to `count` random recipes (six when `None`); failed draws are dropped
    pub async fn featured(&self, count: Option<usize>) -> Vec<Recipe> {
        let count = count.unwrap_or(DEFAULT_RANDOM_COUNT);
        transform_meals(&self.source.random_meals(count).await)
    }

    /// Categories and random picks fetched concurrently, then the first category's recipes.
    ///
    /// `featured_count` defaults to twelve when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the category list cannot be fetched. A failed category
    /// listing degrades to an empty recipe list.
    pub async fn home_feed(&self, featured_count: Option<usize>) -> AppResult<HomeFeed> {
        let featured_count = featured_count.unwrap_or(HOME_FEATURED_COUNT);
        let (categories, featured) =
            tokio::join!(self.categories(), self.featured(Some(featured_count)));
        let categories = categories?;

        let selected_category = categories.first().map(|category| category.name.clone());
        let recipes = match &selected_category {
            Some(name) => self.category_recipes(name).await.unwrap_or_else(|e| {
                warn!(category = %name, error = %e, "Failed to load recipes for selected category");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(HomeFeed {
            categories,
            selected_category,
            recipes,
            featured: featured.into_iter().next(),
        })
    }
}
