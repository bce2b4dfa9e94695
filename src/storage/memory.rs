// ABOUTME: In-memory key-value store backed by a concurrent hash map
// ABOUTME: Used by tests and ephemeral sessions with no on-disk state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::KeyValueStore;
use crate::errors::AppResult;
use dashmap::DashMap;
use std::sync::Arc;

/// `DashMap`-backed store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
