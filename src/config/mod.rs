// ABOUTME: Configuration management module for centralized application settings
// ABOUTME: Re-exports the environment-driven configuration sections
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! - **Environment**: meal API, favorites backend, search and server settings

/// Environment-driven configuration
pub mod environment;

pub use environment::{
    AppConfig, Environment, FavoritesBackend, FavoritesConfig, MealApiConfig, RefreshPolicy,
    SearchConfig, ServerConfig,
};
