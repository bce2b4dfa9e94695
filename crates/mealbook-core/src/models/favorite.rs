// ABOUTME: Favorites data types shared by the stores, the controller and the backend
// ABOUTME: UserId newtype, reduced favorite summary/record shapes and toggle outcome
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the signed-in user, issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identity-provider user id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Body of `POST /api/favorites`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSummary {
    /// Owner
    pub user_id: String,
    /// Meal identifier
    pub recipe_id: String,
    /// Meal name
    pub title: String,
    /// Thumbnail URL
    pub image: String,
    /// Display cook time
    pub cook_time: String,
    /// Display servings
    pub servings: u32,
}

/// Favorite row returned by `GET /api/favorites/:userId`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    /// Row identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Meal identifier
    pub recipe_id: String,
    /// Meal name
    pub title: String,
    /// Thumbnail URL
    #[serde(default)]
    pub image: String,
    /// Display cook time
    #[serde(default)]
    pub cook_time: String,
    /// Display servings
    #[serde(default)]
    pub servings: u32,
    /// RFC 3339 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// What a toggle did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteToggle {
    /// The recipe was absent and has been added
    Added,
    /// The recipe was present and has been removed
    Removed,
    /// The recipe looked absent but the add found it already stored
    AlreadyPresent,
}

impl FavoriteToggle {
    /// Membership after the toggle
    #[must_use]
    pub const fn is_favorite(self) -> bool {
        matches!(self, Self::Added | Self::AlreadyPresent)
    }
}
