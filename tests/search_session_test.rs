// ABOUTME: Debounced search session tests on a paused tokio clock
// ABOUTME: Keystroke coalescing, blank resets, clear, failures and stale response ordering
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::StaticMealSource;
use mealbook::external::MealSource;
use mealbook::services::{RecipeCatalog, SearchSession, SearchState};
use std::sync::Arc;
use std::time::Duration;

fn session(source: StaticMealSource) -> (SearchSession, Arc<StaticMealSource>) {
    common::init_test_logging();
    let source = Arc::new(source);
    let dyn_source: Arc<dyn MealSource> = source.clone();
    (SearchSession::new(RecipeCatalog::new(dyn_source)), source)
}

async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn result_ids(state: &SearchState) -> Vec<&str> {
    state.results.iter().map(|recipe| recipe.id.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_issue_one_search() {
    let (session, source) = session(StaticMealSource::with_fixtures());
    assert_eq!(session.debounce(), Duration::from_millis(500));

    for query in ["c", "ch", "chi", "chicken"] {
        session.submit(query);
        wait_ms(100).await;
    }
    assert!(source.searches().is_empty());
    assert_eq!(session.state().query, "chicken");

    wait_ms(500).await;
    assert_eq!(source.searches(), vec!["chicken"]);

    let state = session.state();
    assert!(state.has_searched);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(result_ids(&state), vec!["52772", "52795"]);
}

#[tokio::test(start_paused = true)]
async fn test_query_is_trimmed_before_searching() {
    let (session, source) = session(StaticMealSource::with_fixtures());

    session.submit("  beef ");
    wait_ms(600).await;

    assert_eq!(source.searches(), vec!["beef"]);
    assert_eq!(session.state().query, "  beef ");
    assert_eq!(result_ids(&session.state()), vec!["52803"]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_resets_without_request() {
    let (session, source) = session(StaticMealSource::with_fixtures());

    session.submit("chicken");
    wait_ms(600).await;
    assert!(session.state().has_searched);

    session.submit("   ");
    wait_ms(600).await;

    let state = session.state();
    assert_eq!(source.searches(), vec!["chicken"]);
    assert!(state.results.is_empty());
    assert!(!state.has_searched);
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_pending_search() {
    let (session, source) = session(StaticMealSource::with_fixtures());

    session.submit("chicken");
    wait_ms(200).await;
    session.clear();
    wait_ms(1000).await;

    assert!(source.searches().is_empty());
    assert_eq!(session.state(), SearchState::default());
}

#[tokio::test(start_paused = true)]
async fn test_search_failure_sets_error() {
    let (session, _) = session(StaticMealSource {
        fail_search: true,
        ..StaticMealSource::with_fixtures()
    });

    session.submit("chicken");
    wait_ms(600).await;

    let state = session.state();
    assert_eq!(state.error.as_deref(), Some("Failed to search recipes"));
    assert!(state.results.is_empty());
    assert!(state.has_searched);
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_loading_while_request_in_flight() {
    let mut source = StaticMealSource::with_fixtures();
    source
        .search_delays
        .insert("chicken".to_owned(), Duration::from_secs(2));
    let (session, _) = session(source);
    let mut updates = session.subscribe();

    session.submit("chicken");
    wait_ms(600).await;
    assert!(session.state().loading);
    assert!(updates.has_changed().unwrap());

    wait_ms(2000).await;
    let state = session.state();
    assert!(!state.loading);
    assert_eq!(state.results.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_stale_response_overwrites_newer_results() {
    let mut source = StaticMealSource::with_fixtures();
    source
        .search_delays
        .insert("chicken".to_owned(), Duration::from_secs(2));
    let (session, source) = session(source);

    session.submit("chicken");
    wait_ms(600).await;

    session.submit("beef");
    wait_ms(600).await;
    assert_eq!(result_ids(&session.state()), vec!["52803"]);

    // The earlier request is never cancelled and lands last
    wait_ms(2000).await;
    let state = session.state();
    assert_eq!(source.searches(), vec!["chicken", "beef"]);
    assert_eq!(state.query, "beef");
    assert_eq!(result_ids(&state), vec!["52772", "52795"]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_session_cancels_timer() {
    let (session, source) = session(StaticMealSource::with_fixtures());

    session.submit("chicken");
    drop(session);
    wait_ms(1000).await;

    assert!(source.searches().is_empty());
}
