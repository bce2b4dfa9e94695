// ABOUTME: Composition context tests wiring a meal source and one favorites store
// ABOUTME: Controllers share the context store and search sessions use the configured debounce
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::StaticMealSource;
use mealbook::config::{
    AppConfig, FavoritesBackend, FavoritesConfig, MealApiConfig, RefreshPolicy, SearchConfig,
};
use mealbook::context::MealbookContext;
use mealbook::favorites::LocalFavoritesStore;
use mealbook::models::UserId;
use mealbook::storage::MemoryKeyValueStore;
use std::sync::Arc;
use std::time::Duration;

fn context(policy: RefreshPolicy) -> MealbookContext {
    common::init_test_logging();
    MealbookContext::new(
        Arc::new(StaticMealSource::with_fixtures()),
        Arc::new(LocalFavoritesStore::new(Arc::new(MemoryKeyValueStore::new()))),
        policy,
        Duration::from_millis(50),
    )
}

#[tokio::test]
async fn test_controllers_share_the_context_store() {
    let context = context(RefreshPolicy::Optimistic);
    let recipe = context
        .catalog()
        .recipe_detail("52772")
        .await
        .unwrap()
        .unwrap();

    let first = context.favorites_for(Some(UserId::from("user_1")));
    assert!(first.add(&recipe).await);

    let second = context.favorites_for(Some(UserId::from("user_1")));
    assert!(second.favorites().is_empty());
    assert!(second.load().await);
    assert!(second.is_favorite("52772"));

    assert!(context
        .favorites_store()
        .is_favorite(&UserId::from("user_1"), "52772")
        .await
        .unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_search_session_uses_configured_debounce() {
    let context = context(RefreshPolicy::Reload);
    let session = context.search_session();
    assert_eq!(session.debounce(), Duration::from_millis(50));

    session.submit("wellington");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(session.state().results.len(), 1);
}

#[tokio::test]
async fn test_from_config_builds_local_store() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let api = common::spawn_mock_meal_api().await;
    let config = AppConfig {
        meal_api: MealApiConfig {
            base_url: api.base_url.clone(),
            ..MealApiConfig::default()
        },
        favorites: FavoritesConfig {
            backend: FavoritesBackend::Local {
                database_url: format!("sqlite:{}", dir.path().join("fav.db").display()),
            },
            refresh_policy: RefreshPolicy::Reload,
        },
        search: SearchConfig {
            debounce: Duration::from_millis(10),
        },
        ..AppConfig::default()
    };

    let context = MealbookContext::from_config(&config).await.unwrap();
    assert_eq!(context.favorites_store().backend_name(), "local");

    let recipes = context.catalog().search("chicken").await.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(api.request_count(), 1);
}
