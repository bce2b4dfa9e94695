// ABOUTME: Core types and constants for the Mealbook recipe platform
// ABOUTME: Foundation crate with error handling, constants, and recipe data models
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Mealbook Core
//!
//! Foundation crate providing shared types and constants for Mealbook. It has no
//! networking or storage dependencies so the data-shape logic can be reused and
//! tested in isolation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Meal API schema limits, display defaults and storage keys
//! - **models**: Raw meal records, transformed recipe records, categories and favorites

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (raw meals, recipes, categories, favorites)
pub mod models;
