// ABOUTME: Internal recipe record and the pure raw-meal to recipe transform
// ABOUTME: Extracts ingredient slots 1-20, splits instructions and derives the description
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::favorite::{FavoriteRecord, FavoriteSummary, UserId};
use super::meal::RawMeal;
use crate::constants::meal_api::MAX_INGREDIENT_SLOTS;
use crate::constants::recipe::{
    DEFAULT_COOK_TIME, DEFAULT_SERVINGS, DESCRIPTION_ELLIPSIS, DESCRIPTION_PREVIEW_CHARS,
    FALLBACK_CATEGORY, FALLBACK_DESCRIPTION_CATEGORY,
};
use serde::{Deserialize, Serialize};

/// Recipe record rendered by lists and detail screens and stored as a favorite.
///
/// Serialized with camelCase keys; this is also the on-device favorites format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Meal identifier (`idMeal`)
    pub id: String,
    /// Meal name
    pub title: String,
    /// Instruction preview or a category/area sentence
    pub description: String,
    /// Thumbnail URL
    pub image: String,
    /// Always [`DEFAULT_COOK_TIME`]
    pub cook_time: String,
    /// Always [`DEFAULT_SERVINGS`]
    pub servings: u32,
    /// Category, [`FALLBACK_CATEGORY`] when the source has none
    pub category: String,
    /// Cuisine area
    pub area: Option<String>,
    /// Measure immediately followed by ingredient name, slot order
    pub ingredients: Vec<String>,
    /// Non-blank instruction lines
    pub instructions: Vec<String>,
    /// Untransformed source record. Absent for entries read back from the remote backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_data: Option<RawMeal>,
}

impl Recipe {
    /// Transform a raw meal into a recipe record
    #[must_use]
    pub fn from_raw(meal: &RawMeal) -> Self {
        let instructions_text = meal.non_empty("strInstructions");

        Self {
            id: meal.id().unwrap_or_default().to_owned(),
            title: meal.name().unwrap_or_default().to_owned(),
            description: describe(meal, instructions_text),
            image: meal.text("strMealThumb").unwrap_or_default().to_owned(),
            cook_time: DEFAULT_COOK_TIME.to_owned(),
            servings: DEFAULT_SERVINGS,
            category: meal
                .non_empty("strCategory")
                .unwrap_or(FALLBACK_CATEGORY)
                .to_owned(),
            area: meal.text("strArea").map(str::to_owned),
            ingredients: extract_ingredients(meal),
            instructions: instructions_text.map_or_else(Vec::new, split_instructions),
            original_data: Some(meal.clone()),
        }
    }

    /// Rebuild a reduced recipe from a remote favorites row.
    ///
    /// Description, category, area, ingredients and instructions are not stored
    /// remotely and come back empty.
    #[must_use]
    pub fn from_record(record: FavoriteRecord) -> Self {
        Self {
            id: record.recipe_id,
            title: record.title,
            image: record.image,
            cook_time: record.cook_time,
            servings: record.servings,
            ..Self::default()
        }
    }

    /// Reduced shape sent to the remote favorites backend
    #[must_use]
    pub fn summary(&self, user_id: &UserId) -> FavoriteSummary {
        FavoriteSummary {
            user_id: user_id.to_string(),
            recipe_id: self.id.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            cook_time: self.cook_time.clone(),
            servings: self.servings,
        }
    }
}

/// Transform an optional raw meal. Absent input short-circuits to `None`.
#[must_use]
pub fn transform_meal(meal: Option<&RawMeal>) -> Option<Recipe> {
    meal.map(Recipe::from_raw)
}

/// Transform a list of raw meals, preserving order
#[must_use]
pub fn transform_meals(meals: &[RawMeal]) -> Vec<Recipe> {
    meals.iter().map(Recipe::from_raw).collect()
}

fn extract_ingredients(meal: &RawMeal) -> Vec<String> {
    (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = meal.non_blank(&format!("strIngredient{slot}"))?;
            let measure = meal
                .non_blank(&format!("strMeasure{slot}"))
                .unwrap_or_default();
            Some(format!("{measure}{ingredient}"))
        })
        .collect()
}

fn split_instructions(text: &str) -> Vec<String> {
    // str::lines splits on "\n" and strips a trailing "\r"
    text.lines()
        .filter(|step| !step.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

fn describe(meal: &RawMeal, instructions: Option<&str>) -> String {
    if let Some(text) = instructions {
        let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        return format!("{preview}{DESCRIPTION_ELLIPSIS}");
    }

    let category = meal
        .non_empty("strCategory")
        .unwrap_or(FALLBACK_DESCRIPTION_CATEGORY);
    meal.non_empty("strArea").map_or_else(
        || format!("{category} meal"),
        |area| format!("{category} from {area}"),
    )
}
