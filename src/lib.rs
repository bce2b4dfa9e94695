// ABOUTME: Main library entry point for the Mealbook recipe application core
// ABOUTME: Meal data client, favorites stores and controller, search services and the favorites backend
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Mealbook
//!
//! Recipe browsing and per-user favorites over `TheMealDB`.
//!
//! ## Architecture
//!
//! - **External**: `TheMealDB` client behind the [`external::MealSource`] seam
//! - **Models**: raw meals and the pure meal → recipe transform (from `mealbook-core`)
//! - **Favorites**: one store per composition (local key-value or remote REST)
//!   and a session-scoped controller
//! - **Services**: recipe catalog and debounced search
//! - **Routes/Database**: the small favorites REST backend
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealbook::config::AppConfig;
//! use mealbook::context::MealbookContext;
//! use mealbook::errors::AppResult;
//! use mealbook::models::UserId;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let context = MealbookContext::from_config(&config).await?;
//!
//!     let recipes = context.catalog().search("chicken").await?;
//!     let favorites = context.favorites_for(Some(UserId::from("user_1")));
//!     if let Some(first) = recipes.first() {
//!         favorites.toggle(first).await;
//!     }
//!     Ok(())
//! }
//! ```

pub use mealbook_core::{constants, errors, models};

/// Environment-driven configuration
pub mod config;
/// Dependency composition
pub mod context;
/// SQLite pools and the favorites table manager
pub mod database;
/// External API clients (`TheMealDB`)
pub mod external;
/// Favorites stores and controller
pub mod favorites;
/// Structured logging setup
pub mod logging;
/// Favorites backend HTTP routes
pub mod routes;
/// Recipe catalog and search services
pub mod services;
/// Key-value storage layer
pub mod storage;
