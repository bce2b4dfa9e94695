// ABOUTME: Database operations for the favorites REST backend
// ABOUTME: Per-user favorite rows with a (user_id, recipe_id) uniqueness constraint
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::connect_pool;
use crate::errors::{AppError, AppResult};
use crate::models::{FavoriteRecord, FavoriteSummary};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Validated favorite to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
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

impl From<FavoriteSummary> for NewFavorite {
    fn from(summary: FavoriteSummary) -> Self {
        Self {
            user_id: summary.user_id,
            recipe_id: summary.recipe_id,
            title: summary.title,
            image: summary.image,
            cook_time: summary.cook_time,
            servings: summary.servings,
        }
    }
}

/// Favorites table operations manager
#[derive(Clone)]
pub struct FavoritesManager {
    pool: SqlitePool,
}

impl FavoritesManager {
    /// Create a new favorites manager over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let manager = Self::new(connect_pool(database_url).await?);
        manager.migrate().await?;
        Ok(manager)
    }

    /// Create the favorites table
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                recipe_id TEXT NOT NULL,
                title TEXT NOT NULL,
                image TEXT NOT NULL DEFAULT '',
                cook_time TEXT NOT NULL DEFAULT '',
                servings INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create favorites table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create favorites index: {e}")))?;

        Ok(())
    }

    /// Check the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// List a user's favorites in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<FavoriteRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recipe_id, title, image, cook_time, servings, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY rowid ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        rows.iter().map(row_to_favorite).collect()
    }

    /// Insert a favorite. Returns `None` when the user already has this recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, favorite: &NewFavorite) -> AppResult<Option<FavoriteRecord>> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO favorites (id, user_id, recipe_id, title, image, cook_time, servings, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(user_id, recipe_id) DO NOTHING
            ",
        )
        .bind(&id)
        .bind(&favorite.user_id)
        .bind(&favorite.recipe_id)
        .bind(&favorite.title)
        .bind(&favorite.image)
        .bind(&favorite.cook_time)
        .bind(i64::from(favorite.servings))
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create favorite: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(FavoriteRecord {
            id,
            user_id: favorite.user_id.clone(),
            recipe_id: favorite.recipe_id.clone(),
            title: favorite.title.clone(),
            image: favorite.image.clone(),
            cook_time: favorite.cook_time.clone(),
            servings: favorite.servings,
            created_at: Some(created_at),
        }))
    }

    /// Delete a user's favorite. Returns whether a row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, user_id: &str, recipe_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_favorite(row: &SqliteRow) -> AppResult<FavoriteRecord> {
    let servings: i64 = row
        .try_get("servings")
        .map_err(|e| AppError::database(format!("Invalid servings column: {e}")))?;

    Ok(FavoriteRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        recipe_id: row.get("recipe_id"),
        title: row.get("title"),
        image: row.get("image"),
        cook_time: row.get("cook_time"),
        servings: u32::try_from(servings).unwrap_or_default(),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(user: &str, recipe: &str) -> NewFavorite {
        NewFavorite {
            user_id: user.to_owned(),
            recipe_id: recipe.to_owned(),
            title: format!("Recipe {recipe}"),
            image: String::new(),
            cook_time: "30 minutes".to_owned(),
            servings: 4,
        }
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let manager = FavoritesManager::connect("sqlite::memory:").await.unwrap();

        let created = manager.create(&favorite("u1", "52772")).await.unwrap();
        assert!(created.is_some());
        assert!(manager.create(&favorite("u1", "52772")).await.unwrap().is_none());
        manager.create(&favorite("u1", "52959")).await.unwrap();
        manager.create(&favorite("u2", "52772")).await.unwrap();

        let list = manager.list("u1").await.unwrap();
        let ids: Vec<_> = list.iter().map(|f| f.recipe_id.as_str()).collect();
        assert_eq!(ids, vec!["52772", "52959"]);
        assert_eq!(list[0].servings, 4);

        assert!(manager.delete("u1", "52772").await.unwrap());
        assert!(!manager.delete("u1", "52772").await.unwrap());
        assert_eq!(manager.list("u1").await.unwrap().len(), 1);
        assert_eq!(manager.list("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_from_client_summary() {
        let manager = FavoritesManager::connect("sqlite::memory:").await.unwrap();
        let summary = FavoriteSummary {
            user_id: "u1".to_owned(),
            recipe_id: "52772".to_owned(),
            title: "Teriyaki Chicken Casserole".to_owned(),
            image: "thumb.jpg".to_owned(),
            cook_time: "30 minutes".to_owned(),
            servings: 4,
        };

        let created = manager
            .create(&NewFavorite::from(summary))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.title, "Teriyaki Chicken Casserole");
        assert_eq!(manager.list("u1").await.unwrap()[0].image, "thumb.jpg");
    }
}
