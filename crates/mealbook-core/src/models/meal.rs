// ABOUTME: Raw TheMealDB meal records and category descriptors
// ABOUTME: Keeps the external schema opaque behind typed field accessors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untransformed meal record as returned by the meal API.
///
/// The external schema is flat and wide (`strIngredient1` … `strIngredient20`,
/// `strMeasure1` … `strMeasure20`, nullable everywhere), so the record is kept as
/// the raw JSON object. Partial records from `filter.php` carry only
/// `idMeal`, `strMeal` and `strMealThumb`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMeal(Map<String, Value>);

impl RawMeal {
    /// String value of a field. Absent, `null` and non-string values are `None`.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Trimmed string value of a field, `None` when absent or blank
    #[must_use]
    pub fn non_blank(&self, field: &str) -> Option<&str> {
        self.text(field).map(str::trim).filter(|s| !s.is_empty())
    }

    /// String value of a field, `None` when absent or the empty string
    #[must_use]
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.text(field).filter(|s| !s.is_empty())
    }

    /// `idMeal`
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.text("idMeal")
    }

    /// `strMeal`
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text("strMeal")
    }
}

impl From<Map<String, Value>> for RawMeal {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Category descriptor from `categories.php`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealCategory {
    /// `idCategory`
    #[serde(rename = "idCategory", default)]
    pub id: String,
    /// `strCategory`
    #[serde(rename = "strCategory")]
    pub name: String,
    /// `strCategoryThumb`
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: String,
    /// `strCategoryDescription`
    #[serde(rename = "strCategoryDescription", default)]
    pub description: String,
}

/// Category as shown in the browse list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// 1-based position in the category list
    pub position: usize,
    /// Category name, also the filter value
    pub name: String,
    /// Thumbnail URL
    pub image: String,
    /// Long description
    pub description: String,
}

/// Number the categories in listing order
#[must_use]
pub fn summarize_categories(categories: &[MealCategory]) -> Vec<CategorySummary> {
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| CategorySummary {
            position: index + 1,
            name: category.name.clone(),
            image: category.thumbnail.clone(),
            description: category.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_ignores_null_and_non_strings() {
        let meal: RawMeal = serde_json::from_value(json!({
            "idMeal": "52772",
            "strArea": null,
            "strTags": 7,
            "strMeasure1": "   ",
        }))
        .unwrap();

        assert_eq!(meal.id(), Some("52772"));
        assert_eq!(meal.text("strArea"), None);
        assert_eq!(meal.text("strTags"), None);
        assert_eq!(meal.text("strMeasure1"), Some("   "));
        assert_eq!(meal.non_blank("strMeasure1"), None);
        assert_eq!(meal.non_empty("strMeasure1"), Some("   "));
    }

    #[test]
    fn test_summarize_categories_positions_start_at_one() {
        let categories: Vec<MealCategory> = serde_json::from_value(json!([
            { "idCategory": "1", "strCategory": "Beef", "strCategoryThumb": "beef.png", "strCategoryDescription": "Beef dishes" },
            { "idCategory": "2", "strCategory": "Chicken", "strCategoryThumb": "chicken.png", "strCategoryDescription": "Chicken dishes" },
        ]))
        .unwrap();

        let summaries = summarize_categories(&categories);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].position, 1);
        assert_eq!(summaries[0].name, "Beef");
        assert_eq!(summaries[1].position, 2);
        assert_eq!(summaries[1].image, "chicken.png");
    }
}
