// ABOUTME: Session-scoped favorites controller with an in-memory mirror of the store
// ABOUTME: Load, add, remove and toggle with loading/error flags and a uniform refresh policy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::FavoritesStore;
use crate::config::RefreshPolicy;
use crate::logging::AppLogger;
use crate::models::{FavoriteToggle, Recipe, UserId};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

const LOAD_FAILED: &str = "Failed to load favorites";
const ADD_FAILED: &str = "Failed to add favorite";
const REMOVE_FAILED: &str = "Failed to remove favorite";
const TOGGLE_FAILED: &str = "Failed to update favorite";

#[derive(Debug, Default)]
struct ControllerState {
    user: Option<UserId>,
    favorites: Vec<Recipe>,
    loading: bool,
    error: Option<String>,
}

/// In-memory mirror of one user's favorites.
///
/// Every operation returns `false` without touching the store while no user is
/// signed in. Failures are logged and recorded in [`Self::error`].
/// The cache may be stale with respect to other writers of the same store.
pub struct FavoritesController {
    store: Arc<dyn FavoritesStore>,
    policy: RefreshPolicy,
    state: RwLock<ControllerState>,
}

impl FavoritesController {
    /// Create a controller for `user` (or no one) over `store`
    #[must_use]
    pub fn new(
        store: Arc<dyn FavoritesStore>,
        user: Option<UserId>,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            store,
            policy,
            state: RwLock::new(ControllerState {
                user,
                ..ControllerState::default()
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ControllerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ControllerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signed-in user, if any
    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        self.read().user.clone()
    }

    /// Switch the session user. Clears the cache and the error flag; call
    /// [`Self::load`] afterwards.
    pub fn set_user(&self, user: Option<UserId>) {
        let mut state = self.write();
        state.user = user;
        state.favorites.clear();
        state.loading = false;
        state.error = None;
    }

    /// Snapshot of the cached favorites
    #[must_use]
    pub fn favorites(&self) -> Vec<Recipe> {
        self.read().favorites.clone()
    }

    /// True while [`Self::load`] is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Message of the last failure, cleared by the next successful load
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Cache membership test; never hits the store
    #[must_use]
    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.read()
            .favorites
            .iter()
            .any(|recipe| recipe.id == recipe_id)
    }

    /// Replace the cache with the store's list
    pub async fn load(&self) -> bool {
        let Some(user) = self.user() else {
            return false;
        };

        {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.store.get(&user).await;

        let mut state = self.write();
        if state.user.as_ref() != Some(&user) {
            debug!(user_id = %user, "Discarding favorites load for a previous user");
            return false;
        }
        state.loading = false;
        match result {
            Ok(favorites) => {
                state.favorites = favorites;
                true
            }
            Err(e) => {
                warn!(
                    user_id = %user,
                    backend = self.store.backend_name(),
                    error = %e,
                    "{LOAD_FAILED}"
                );
                state.error = Some(LOAD_FAILED.to_owned());
                false
            }
        }
    }

    /// Add `recipe`. Returns `false` when it was already a favorite or the store failed.
    pub async fn add(&self, recipe: &Recipe) -> bool {
        let Some(user) = self.user() else {
            return false;
        };

        match self.store.add(&user, recipe).await {
            Ok(added) => {
                AppLogger::log_favorite_event(user.as_str(), &recipe.id, "add", added);
                if added {
                    self.refresh(&user, |favorites| push_absent(favorites, recipe))
                        .await;
                }
                added
            }
            Err(e) => self.fail(&user, &recipe.id, "add", ADD_FAILED, &e),
        }
    }

    /// Remove the favorite with `recipe_id`
    pub async fn remove(&self, recipe_id: &str) -> bool {
        let Some(user) = self.user() else {
            return false;
        };

        match self.store.remove(&user, recipe_id).await {
            Ok(()) => {
                AppLogger::log_favorite_event(user.as_str(), recipe_id, "remove", true);
                self.refresh(&user, |favorites| {
                    favorites.retain(|recipe| recipe.id != recipe_id);
                })
                .await;
                true
            }
            Err(e) => self.fail(&user, recipe_id, "remove", REMOVE_FAILED, &e),
        }
    }

    /// Flip membership of `recipe` in the store.
    ///
    /// Returns `false` when the add half found the recipe already stored, same as [`Self::add`].
    pub async fn toggle(&self, recipe: &Recipe) -> bool {
        let Some(user) = self.user() else {
            return false;
        };

        match self.store.toggle(&user, recipe).await {
            Ok(outcome) => {
                let changed = outcome != FavoriteToggle::AlreadyPresent;
                let event = if outcome.is_favorite() {
                    "toggle_on"
                } else {
                    "toggle_off"
                };
                AppLogger::log_favorite_event(user.as_str(), &recipe.id, event, changed);
                self.refresh(&user, |favorites| {
                    if outcome.is_favorite() {
                        push_absent(favorites, recipe);
                    } else {
                        favorites.retain(|r| r.id != recipe.id);
                    }
                })
                .await;
                changed
            }
            Err(e) => self.fail(&user, &recipe.id, "toggle", TOGGLE_FAILED, &e),
        }
    }

    /// Bring the cache in step after a successful mutation, per the refresh policy
    async fn refresh(&self, user: &UserId, patch: impl FnOnce(&mut Vec<Recipe>) + Send) {
        match self.policy {
            RefreshPolicy::Optimistic => {
                let mut state = self.write();
                if state.user.as_ref() == Some(user) {
                    patch(&mut state.favorites);
                }
            }
            RefreshPolicy::Reload => {
                let result = self.store.get(user).await;
                let mut state = self.write();
                if state.user.as_ref() != Some(user) {
                    return;
                }
                match result {
                    Ok(favorites) => state.favorites = favorites,
                    Err(e) => {
                        warn!(user_id = %user, error = %e, "{LOAD_FAILED}");
                        state.error = Some(LOAD_FAILED.to_owned());
                    }
                }
            }
        }
    }

    fn fail(
        &self,
        user: &UserId,
        recipe_id: &str,
        event: &str,
        message: &str,
        error: &dyn std::fmt::Display,
    ) -> bool {
        AppLogger::log_favorite_event(user.as_str(), recipe_id, event, false);
        warn!(
            user_id = %user,
            recipe_id,
            backend = self.store.backend_name(),
            error = %error,
            "{message}"
        );
        self.write().error = Some(message.to_owned());
        false
    }
}

fn push_absent(favorites: &mut Vec<Recipe>, recipe: &Recipe) {
    if !favorites.iter().any(|existing| existing.id == recipe.id) {
        favorites.push(recipe.clone());
    }
}
