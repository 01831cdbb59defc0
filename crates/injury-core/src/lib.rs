// ABOUTME: Core types and constants for the injury tracker workspace
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![deny(unsafe_code)]

//! # Injury Core
//!
//! Foundation crate providing shared types and constants for injury tracking
//! and recovery planning. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Domain limits, value ranges, and fixed user-facing messages
//! - **models**: Injuries, recovery plans, exercises, progress entries, and alerts

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Injury, Exercise, `ProgressEntry`, `RecoveryPlan`, etc.)
pub mod models;

/// Human-readable formatting for dates and lists used in prompts and CLI output
pub mod formatters;
