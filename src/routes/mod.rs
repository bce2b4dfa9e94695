// ABOUTME: HTTP route composition for the favorites backend
// ABOUTME: Merges favorites and health routers under a request tracing layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Favorites backend routes

/// `/api/favorites` endpoints
pub mod favorites;
/// `/health` and `/ready`
pub mod health;

pub use favorites::FavoritesRoutes;
pub use health::HealthRoutes;

use crate::database::FavoritesManager;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Complete favorites backend router
pub fn router(manager: Arc<FavoritesManager>) -> Router {
    Router::new()
        .merge(FavoritesRoutes::routes(Arc::clone(&manager)))
        .merge(HealthRoutes::routes(manager))
        .layer(TraceLayer::new_for_http())
}
