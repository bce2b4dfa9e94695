// ABOUTME: Health check route handlers for the favorites backend
// ABOUTME: Liveness and database readiness endpoints for monitoring
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::service_names;
use crate::database::FavoritesManager;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(manager: Arc<FavoritesManager>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "service": service_names::FAVORITES_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(manager): State<Arc<FavoritesManager>>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let (status, label) = match manager.ping().await {
                Ok(()) => (StatusCode::OK, "ready"),
                Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            };
            (
                status,
                Json(serde_json::json!({
                    "status": label,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(manager)
    }
}
