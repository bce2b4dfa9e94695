// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses meal API, favorites backend, search and server settings from environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration
//!
//! Configuration is environment-only: every section has a `Default` and a
//! `from_env()` constructor, and [`AppConfig::from_env`] validates the result.

use crate::constants::{browse, favorites, meal_api, ports};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Meal data API client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealApiConfig {
    /// Base endpoint, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for MealApiConfig {
    fn default() -> Self {
        Self {
            base_url: meal_api::DEFAULT_BASE_URL.to_owned(),
            timeout_secs: meal_api::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: meal_api::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl MealApiConfig {
    /// Load from `MEAL_API_BASE_URL`, `MEAL_API_TIMEOUT_SECS`, `MEAL_API_CONNECT_TIMEOUT_SECS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_var_or("MEAL_API_BASE_URL", meal_api::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            timeout_secs: env_parse_or("MEAL_API_TIMEOUT_SECS", meal_api::DEFAULT_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_or(
                "MEAL_API_CONNECT_TIMEOUT_SECS",
                meal_api::DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }
}

/// Which favorites store a composition uses. Exactly one is built per context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesBackend {
    /// On-device key-value persistence in a SQLite file
    Local {
        /// `sqlite:` connection URL
        database_url: String,
    },
    /// Remote REST backend
    Remote {
        /// Backend base URL, without trailing slash
        base_url: String,
        /// Request timeout in seconds
        timeout_secs: u64,
    },
}

impl FavoritesBackend {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Remote { .. } => "remote",
        }
    }
}

/// How the favorites controller keeps its cache in step with the store after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Re-read the whole list from the store after every successful mutation
    #[default]
    Reload,
    /// Patch the cached list locally after every successful mutation
    Optimistic,
}

impl RefreshPolicy {
    /// Parse `reload` / `optimistic`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for any other value
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "reload" => Ok(Self::Reload),
            "optimistic" => Ok(Self::Optimistic),
            other => Err(AppError::config_invalid(format!(
                "Unknown favorites refresh policy: {other}"
            ))),
        }
    }
}

/// Favorites persistence configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesConfig {
    /// Selected backend
    pub backend: FavoritesBackend,
    /// Cache refresh policy of the controller
    pub refresh_policy: RefreshPolicy,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            backend: FavoritesBackend::Local {
                database_url: default_local_database_url(),
            },
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

impl FavoritesConfig {
    /// Load from `FAVORITES_BACKEND`, `FAVORITES_DATABASE_URL`, `FAVORITES_API_URL`,
    /// `FAVORITES_API_TIMEOUT_SECS` and `FAVORITES_REFRESH_POLICY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an unknown backend or refresh policy
    pub fn from_env() -> AppResult<Self> {
        let backend = match env_var_or("FAVORITES_BACKEND", "local")
            .trim()
            .to_lowercase()
            .as_str()
        {
            "local" => FavoritesBackend::Local {
                database_url: env::var("FAVORITES_DATABASE_URL")
                    .unwrap_or_else(|_| default_local_database_url()),
            },
            "remote" => FavoritesBackend::Remote {
                base_url: env_var_or("FAVORITES_API_URL", favorites::DEFAULT_API_URL)
                    .trim_end_matches('/')
                    .to_owned(),
                timeout_secs: env_parse_or(
                    "FAVORITES_API_TIMEOUT_SECS",
                    favorites::DEFAULT_API_TIMEOUT_SECS,
                ),
            },
            other => {
                return Err(AppError::config_invalid(format!(
                    "Unknown favorites backend: {other} (expected 'local' or 'remote')"
                )))
            }
        };

        Ok(Self {
            backend,
            refresh_policy: RefreshPolicy::parse(&env_var_or("FAVORITES_REFRESH_POLICY", "reload"))?,
        })
    }
}

/// Search behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Delay between the last keystroke and the request
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(browse::SEARCH_DEBOUNCE_MS),
        }
    }
}

impl SearchConfig {
    /// Load from `SEARCH_DEBOUNCE_MS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debounce: Duration::from_millis(env_parse_or(
                "SEARCH_DEBOUNCE_MS",
                browse::SEARCH_DEBOUNCE_MS,
            )),
        }
    }
}

/// Favorites REST backend settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listening port
    pub http_port: u16,
    /// `sqlite:` connection URL of the backend database
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            database_url: "sqlite:./favorites_backend.db".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load from `HTTP_PORT` and `DATABASE_URL`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_port: env_parse_or("HTTP_PORT", defaults.http_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Meal data API
    pub meal_api: MealApiConfig,
    /// Favorites persistence
    pub favorites: FavoritesConfig,
    /// Search behaviour
    pub search: SearchConfig,
    /// Favorites backend server
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load and validate configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a value is unknown or empty
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            meal_api: MealApiConfig::from_env(),
            favorites: FavoritesConfig::from_env()?,
            search: SearchConfig::from_env(),
            server: ServerConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the offending setting
    pub fn validate(&self) -> AppResult<()> {
        if self.meal_api.base_url.trim().is_empty() {
            return Err(AppError::config_invalid("MEAL_API_BASE_URL must not be empty"));
        }
        match &self.favorites.backend {
            FavoritesBackend::Local { database_url } if database_url.trim().is_empty() => Err(
                AppError::config_invalid("FAVORITES_DATABASE_URL must not be empty"),
            ),
            FavoritesBackend::Remote { base_url, .. } if base_url.trim().is_empty() => Err(
                AppError::config_invalid("FAVORITES_API_URL must not be empty"),
            ),
            _ => Ok(()),
        }
    }

    /// One-line description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        let favorites = match &self.favorites.backend {
            FavoritesBackend::Local { database_url } => format!("local ({database_url})"),
            FavoritesBackend::Remote { base_url, .. } => format!("remote ({base_url})"),
        };
        format!(
            "Mealbook configuration: environment={}, meal_api={}, favorites={}, refresh={:?}, search_debounce={}ms",
            self.environment,
            self.meal_api.base_url,
            favorites,
            self.favorites.refresh_policy,
            self.search.debounce.as_millis(),
        )
    }
}

/// Default on-device favorites database under the platform data directory
fn default_local_database_url() -> String {
    let path = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mealbook")
        .join("favorites.db");
    format!("sqlite:{}", path.display())
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
