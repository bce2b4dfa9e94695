// ABOUTME: Debounced recipe search session driven by keystrokes
// ABOUTME: Cancels the pending timer on each submit and publishes state through a watch channel
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Debounced search
//!
//! Each [`SearchSession::submit`] restarts the debounce timer. When the timer
//! fires the search runs in its own detached task, so a request already in
//! flight is never cancelled and a slow response may overwrite a newer one.

use super::catalog::RecipeCatalog;
use crate::constants::browse::SEARCH_DEBOUNCE_MS;
use crate::models::Recipe;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const SEARCH_FAILED: &str = "Failed to search recipes";

/// Observable search screen state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Latest submitted input, untrimmed
    pub query: String,
    /// Results of the last completed search
    pub results: Vec<Recipe>,
    /// A search request is in flight
    pub loading: bool,
    /// At least one non-blank search has completed since the last reset
    pub has_searched: bool,
    /// Message of the last failed search
    pub error: Option<String>,
}

/// One search screen's debounced query pipeline. Requires a tokio runtime.
pub struct SearchSession {
    catalog: RecipeCatalog,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    /// Create a session with the default 500 ms debounce
    #[must_use]
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self::with_debounce(catalog, Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    /// Create a session with a custom debounce delay
    #[must_use]
    pub fn with_debounce(catalog: RecipeCatalog, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            catalog,
            debounce,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// Configured debounce delay
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Record `query` and restart the debounce timer
    pub fn submit(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.query.clone_from(&query));

        let catalog = self.catalog.clone();
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let trimmed = query.trim();
            if trimmed.is_empty() {
                state.send_modify(|state| {
                    state.results.clear();
                    state.has_searched = false;
                    state.error = None;
                });
                return;
            }

            tokio::spawn(run_search(catalog, state, trimmed.to_owned()));
        });

        if let Some(previous) = self.replace_pending(Some(timer)) {
            previous.abort();
        }
    }

    /// Cancel any pending timer and reset to the initial state
    pub fn clear(&self) {
        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
        self.state.send_replace(SearchState::default());
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    fn replace_pending(&self, timer: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *pending, timer)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(timer) = self.replace_pending(None) {
            timer.abort();
        }
    }
}

async fn run_search(
    catalog: RecipeCatalog,
    state: Arc<watch::Sender<SearchState>>,
    query: String,
) {
    state.send_modify(|state| {
        state.loading = true;
        state.error = None;
    });

    let result = catalog.search(&query).await;

    state.send_modify(move |state| {
        state.loading = false;
        state.has_searched = true;
        match result {
            Ok(results) => {
                debug!(query = %query, results = results.len(), "Search results published");
                state.results = results;
            }
            Err(e) => {
                warn!(query = %query, error = %e, "{SEARCH_FAILED}");
                state.results.clear();
                state.error = Some(SEARCH_FAILED.to_owned());
            }
        }
    });
}
