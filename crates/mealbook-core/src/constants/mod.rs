// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Meal API schema limits, recipe display defaults, storage keys and timings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped by the domain that owns them.

/// TheMealDB API endpoints and schema limits
pub mod meal_api {
    /// Public base endpoint of TheMealDB (free test key `1`)
    pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

    /// Service name used in error messages and logs
    pub const SERVICE_NAME: &str = "meal api";

    /// Number of `strIngredientN` / `strMeasureN` slots in a meal record.
    /// Fixed by the external schema, must not change.
    pub const MAX_INGREDIENT_SLOTS: usize = 20;

    /// Search by meal name (`?s=`)
    pub const SEARCH_PATH: &str = "search.php";
    /// Lookup full meal by id (`?i=`)
    pub const LOOKUP_PATH: &str = "lookup.php";
    /// Single random meal
    pub const RANDOM_PATH: &str = "random.php";
    /// All meal categories
    pub const CATEGORIES_PATH: &str = "categories.php";
    /// Filter by category (`?c=`) or main ingredient (`?i=`)
    pub const FILTER_PATH: &str = "filter.php";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Display defaults applied by the meal → recipe transform
pub mod recipe {
    /// Cook time shown for every recipe (not derived from source data)
    pub const DEFAULT_COOK_TIME: &str = "30 minutes";
    /// Servings shown for every recipe (not derived from source data)
    pub const DEFAULT_SERVINGS: u32 = 4;
    /// Category used when the source meal has none
    pub const FALLBACK_CATEGORY: &str = "Main Course";
    /// Leading word of the fallback description when the meal has no category
    pub const FALLBACK_DESCRIPTION_CATEGORY: &str = "Delicious";
    /// Number of instruction characters kept in the description preview
    pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;
    /// Suffix appended to the description preview
    pub const DESCRIPTION_ELLIPSIS: &str = "...";
}

/// Browsing and search defaults
pub mod browse {
    /// Random meals sampled when no count is given
    pub const DEFAULT_RANDOM_COUNT: usize = 6;
    /// Random meals sampled for the home feed
    pub const HOME_FEATURED_COUNT: usize = 12;
    /// Delay between the last keystroke and the search request
    pub const SEARCH_DEBOUNCE_MS: u64 = 500;
}

/// Favorites persistence
pub mod favorites {
    /// Prefix of the per-user key in local key-value storage
    pub const STORAGE_KEY_PREFIX: &str = "@favorites_";

    /// Remote favorites collection path
    pub const API_PATH: &str = "/api/favorites";

    /// Default base URL of the remote favorites backend
    pub const DEFAULT_API_URL: &str = "http://localhost:3000";

    /// Request timeout for the remote favorites backend
    pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

    /// Service name used in error messages and logs
    pub const SERVICE_NAME: &str = "favorites backend";

    /// Storage key for a user's favorites list
    #[must_use]
    pub fn storage_key(user_id: &str) -> String {
        format!("{STORAGE_KEY_PREFIX}{user_id}")
    }
}

/// Network ports
pub mod ports {
    /// Default HTTP port of the favorites backend
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Service identification for logs
pub mod service_names {
    /// Library / client side
    pub const MEALBOOK: &str = "mealbook";
    /// Favorites REST backend
    pub const FAVORITES_SERVER: &str = "mealbook-favorites-server";
}

#[cfg(test)]
mod tests {
    use super::favorites::storage_key;

    #[test]
    fn test_storage_key_is_user_scoped() {
        assert_eq!(storage_key("user_42"), "@favorites_user_42");
        assert_ne!(storage_key("a"), storage_key("b"));
    }
}
