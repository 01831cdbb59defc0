// ABOUTME: Application error types re-exported from the core crate
// ABOUTME: Adds conversions for the persistence and HTTP client errors used in this crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # Unified Error Handling
//!
//! `AppError`, `ErrorCode`, and `AppResult` live in `injury-core` so that the
//! engine and the models share them. This module re-exports them and provides
//! the helpers that only make sense where `sqlx` and `reqwest` are in scope.

pub use injury_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};

use injury_core::constants::service_names::LLM_SERVICE;

/// Map a `sqlx` failure into a database error, naming the operation
#[must_use]
pub fn database_error(operation: &str, error: &sqlx::Error) -> AppError {
    AppError::database(format!("Failed to {operation}: {error}"))
}

/// Map a transport-level `reqwest` failure into an external service error
#[must_use]
pub fn llm_transport_error(error: &reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::external_unavailable(LLM_SERVICE, format!("Request failed: {error}"))
    } else {
        AppError::external_service(LLM_SERVICE, format!("Request failed: {error}"))
    }
}
