// ABOUTME: Core data models for Mealbook
// ABOUTME: Re-exports raw meal records, recipe records, categories and favorites types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! - `RawMeal`: untransformed meal record as returned by TheMealDB
//! - `Recipe`: internal recipe record produced by [`transform_meal`]
//! - `MealCategory` / `CategorySummary`: category descriptors and their display shape
//! - `UserId`, `FavoriteSummary`, `FavoriteRecord`, `FavoriteToggle`: favorites plumbing

mod favorite;
mod meal;
mod recipe;

pub use favorite::{FavoriteRecord, FavoriteSummary, FavoriteToggle, UserId};
pub use meal::{summarize_categories, CategorySummary, MealCategory, RawMeal};
pub use recipe::{transform_meal, transform_meals, Recipe};
