// ABOUTME: SQLite connection management shared by the key-value store and the favorites backend
// ABOUTME: Opens pools with create-if-missing semantics and hosts the favorites table manager
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Database Management

/// Favorites table operations for the REST backend
pub mod favorites;

pub use favorites::{FavoritesManager, NewFavorite};

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Pool size for file databases
const MAX_FILE_CONNECTIONS: u32 = 5;

/// Open a SQLite pool, creating the database file (and its directory) if missing.
///
/// `sqlite::memory:` URLs get a single long-lived connection so every query
/// sees the same database.
///
/// # Errors
///
/// Returns `DatabaseError` if the directory cannot be created or the pool cannot connect
pub async fn connect_pool(database_url: &str) -> AppResult<SqlitePool> {
    let in_memory = database_url.contains(":memory:");

    if !in_memory {
        ensure_parent_dir(database_url)?;
    }

    // Ensure SQLite creates the database file if it doesn't exist
    let connection_url =
        if database_url.starts_with("sqlite:") && !in_memory && !database_url.contains('?') {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_FILE_CONNECTIONS)
    };

    options
        .connect(&connection_url)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database {database_url}: {e}")))
}

fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };

    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}

/// File path part of a `sqlite:` URL, without query string
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}
