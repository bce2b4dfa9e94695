// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Raw meal fixtures, an in-memory meal source, a mock meal API and a live favorites backend
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::significant_drop_tightening
)]
#![allow(missing_docs)]
//! Shared test utilities for `mealbook`

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use mealbook::{
    database::FavoritesManager,
    errors::{AppError, AppResult},
    external::MealSource,
    models::{MealCategory, RawMeal, Recipe},
    routes,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::net::TcpListener;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ── Fixtures ────────────────────────────────────────────────────────────

fn raw(value: Value) -> RawMeal {
    serde_json::from_value(value).unwrap()
}

/// Full record, three ingredients, CRLF instructions
pub fn teriyaki_chicken() -> RawMeal {
    raw(json!({
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strInstructions": "Preheat oven to 350 F.\r\n\r\nCombine soy sauce and honey.\r\nBake for 35 minutes.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strIngredient1": "soy sauce",
        "strMeasure1": "3/4 cup",
        "strIngredient2": "water",
        "strMeasure2": "1/2 cup",
        "strIngredient3": "chicken breasts",
        "strMeasure3": "2",
        "strIngredient4": "",
        "strMeasure4": "",
        "strIngredient5": null,
        "strMeasure5": null
    }))
}

/// Full record without an area
pub fn chicken_handi() -> RawMeal {
    raw(json!({
        "idMeal": "52795",
        "strMeal": "Chicken Handi",
        "strCategory": "Chicken",
        "strArea": null,
        "strInstructions": "Take a large pot.\nAdd the chicken.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/wyxwsp1486979827.jpg",
        "strIngredient1": "Chicken",
        "strMeasure1": "1.2 kg",
        "strIngredient2": "Onion",
        "strMeasure2": "5 thinly sliced"
    }))
}

/// Full record in another category
pub fn beef_wellington() -> RawMeal {
    raw(json!({
        "idMeal": "52803",
        "strMeal": "Beef Wellington",
        "strCategory": "Beef",
        "strArea": "British",
        "strInstructions": "Put the mushrooms into a food processor.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/vvpprx1487325699.jpg",
        "strIngredient1": "mushrooms",
        "strMeasure1": "400g",
        "strIngredient2": "Beef Fillet",
        "strMeasure2": "750g"
    }))
}

pub fn all_meals() -> Vec<RawMeal> {
    vec![teriyaki_chicken(), chicken_handi(), beef_wellington()]
}

pub fn category(id: &str, name: &str) -> MealCategory {
    MealCategory {
        id: id.to_owned(),
        name: name.to_owned(),
        thumbnail: format!("https://www.themealdb.com/images/category/{}.png", name.to_lowercase()),
        description: format!("{name} dishes"),
    }
}

pub fn all_categories() -> Vec<MealCategory> {
    vec![category("1", "Beef"), category("2", "Chicken")]
}

/// `filter.php` style record: id, name and thumbnail only
pub fn partial(meal: &RawMeal) -> RawMeal {
    raw(json!({
        "idMeal": meal.id(),
        "strMeal": meal.name(),
        "strMealThumb": meal.text("strMealThumb"),
    }))
}

/// Recipe transformed from a fixture
pub fn recipe(meal: &RawMeal) -> Recipe {
    Recipe::from_raw(meal)
}

fn uses_ingredient(meal: &RawMeal, ingredient: &str) -> bool {
    (1..=20).any(|slot| {
        meal.non_blank(&format!("strIngredient{slot}"))
            .is_some_and(|value| value.eq_ignore_ascii_case(ingredient))
    })
}

fn name_matches(meal: &RawMeal, query: &str) -> bool {
    meal.name()
        .is_some_and(|name| name.to_lowercase().contains(&query.to_lowercase()))
}

// ── In-memory meal source ───────────────────────────────────────────────

/// Deterministic [`MealSource`] over fixtures with per-operation failure switches
#[derive(Default)]
pub struct StaticMealSource {
    pub meals: Vec<RawMeal>,
    pub categories: Vec<MealCategory>,
    pub fail_search: bool,
    pub fail_random: bool,
    pub fail_categories: bool,
    pub fail_filter: bool,
    /// Artificial latency per search query (lowercase)
    pub search_delays: HashMap<String, Duration>,
    pub search_calls: Mutex<Vec<String>>,
    pub random_cursor: AtomicUsize,
}

impl StaticMealSource {
    pub fn with_fixtures() -> Self {
        Self {
            meals: all_meals(),
            categories: all_categories(),
            ..Self::default()
        }
    }

    pub fn searches(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    fn failure(operation: &str) -> AppError {
        AppError::external_service("meal api", format!("{operation} unavailable"))
    }
}

#[async_trait]
impl MealSource for StaticMealSource {
    async fn search_by_name(&self, query: &str) -> AppResult<Vec<RawMeal>> {
        self.search_calls.lock().unwrap().push(query.to_owned());
        if let Some(delay) = self.search_delays.get(&query.to_lowercase()) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_search {
            return Err(Self::failure("search"));
        }
        Ok(self
            .meals
            .iter()
            .filter(|meal| name_matches(meal, query))
            .cloned()
            .collect())
    }

    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<RawMeal>> {
        Ok(self.meals.iter().find(|meal| meal.id() == Some(id)).cloned())
    }

    async fn random_meal(&self) -> AppResult<Option<RawMeal>> {
        if self.fail_random {
            return Err(Self::failure("random"));
        }
        if self.meals.is_empty() {
            return Ok(None);
        }
        let index = self.random_cursor.fetch_add(1, Ordering::SeqCst) % self.meals.len();
        Ok(Some(self.meals[index].clone()))
    }

    async fn categories(&self) -> AppResult<Vec<MealCategory>> {
        if self.fail_categories {
            return Err(Self::failure("categories"));
        }
        Ok(self.categories.clone())
    }

    async fn filter_by_category(&self, category: &str) -> AppResult<Vec<RawMeal>> {
        if self.fail_filter {
            return Err(Self::failure("filter"));
        }
        Ok(self
            .meals
            .iter()
            .filter(|meal| meal.text("strCategory") == Some(category))
            .map(partial)
            .collect())
    }

    async fn filter_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<RawMeal>> {
        if self.fail_filter {
            return Err(Self::failure("filter"));
        }
        Ok(self
            .meals
            .iter()
            .filter(|meal| uses_ingredient(meal, ingredient))
            .map(partial)
            .collect())
    }
}

// ── HTTP servers ────────────────────────────────────────────────────────

/// Serve `app` on an ephemeral localhost port and return its base URL
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockState {
    fn record(&self, params: &HashMap<String, String>) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(params.clone());
    }
}

/// Mock `TheMealDB` serving the fixtures
pub struct MockMealApi {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockMealApi {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }
}

fn meals_envelope(meals: Vec<RawMeal>) -> Json<Value> {
    if meals.is_empty() {
        Json(json!({ "meals": null }))
    } else {
        Json(json!({ "meals": meals }))
    }
}

async fn mock_search(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record(&params);
    let query = params.get("s").cloned().unwrap_or_default();
    meals_envelope(
        all_meals()
            .into_iter()
            .filter(|meal| name_matches(meal, &query))
            .collect(),
    )
}

async fn mock_lookup(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record(&params);
    let id = params.get("i").cloned().unwrap_or_default();
    meals_envelope(
        all_meals()
            .into_iter()
            .filter(|meal| meal.id() == Some(id.as_str()))
            .collect(),
    )
}

async fn mock_random(State(state): State<MockState>) -> Json<Value> {
    state.record(&HashMap::new());
    meals_envelope(vec![teriyaki_chicken()])
}

async fn mock_categories(State(state): State<MockState>) -> Json<Value> {
    state.record(&HashMap::new());
    Json(json!({ "categories": all_categories() }))
}

async fn mock_filter(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record(&params);
    let meals = all_meals();
    let matches: Vec<RawMeal> = if let Some(category) = params.get("c") {
        meals
            .iter()
            .filter(|meal| meal.text("strCategory") == Some(category.as_str()))
            .map(partial)
            .collect()
    } else if let Some(ingredient) = params.get("i") {
        meals
            .iter()
            .filter(|meal| uses_ingredient(meal, ingredient))
            .map(partial)
            .collect()
    } else {
        Vec::new()
    };
    meals_envelope(matches)
}

/// Mock meal API on an ephemeral port
pub async fn spawn_mock_meal_api() -> MockMealApi {
    init_test_logging();
    let state = MockState::default();
    let app = Router::new()
        .route("/search.php", get(mock_search))
        .route("/lookup.php", get(mock_lookup))
        .route("/random.php", get(mock_random))
        .route("/categories.php", get(mock_categories))
        .route("/filter.php", get(mock_filter))
        .with_state(state.clone());

    MockMealApi {
        base_url: serve(app).await,
        requests: state.requests,
        last_query: state.last_query,
    }
}

/// Server answering every request with `status` and `body`
pub async fn spawn_static_server(status: StatusCode, body: &'static str) -> String {
    init_test_logging();
    serve(Router::new().fallback(move || async move { (status, body) })).await
}

/// Real favorites backend over an in-memory database
pub async fn spawn_favorites_server() -> String {
    init_test_logging();
    let manager = FavoritesManager::connect("sqlite::memory:").await.unwrap();
    serve(routes::router(Arc::new(manager))).await
}

/// A localhost URL nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}
