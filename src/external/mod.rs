// ABOUTME: External API client modules (TheMealDB)
// ABOUTME: Shared HTTP client plus the meal data source seam
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients

/// Shared outbound HTTP client
pub mod http_client;
/// `TheMealDB` client
pub mod meal_db;

pub use meal_db::{MealDbClient, MealDbClientConfig, MealSource};
