// ABOUTME: Domain service layer for recipe browsing and search
// ABOUTME: Protocol-agnostic services consumed by the view layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Domain service layer

/// Recipe search, detail, listings and the home feed
pub mod catalog;

/// Debounced search session
pub mod search;

pub use catalog::{HomeFeed, RecipeCatalog};
pub use search::{SearchSession, SearchState};
