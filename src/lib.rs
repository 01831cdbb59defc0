// ABOUTME: Main library entry point for the injury tracker
// ABOUTME: Wires configuration, logging, persistence, LLM analysis, and smart exercise adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![deny(unsafe_code)]

//! # Injury Tracker
//!
//! Track sports injuries, log daily recovery progress, and keep exercise
//! plans in step with how recovery is actually going.
//!
//! ## Features
//!
//! - **Injury reports**: body part, cause, sport, and symptoms per user
//! - **Progress log**: dated pain, mobility, and swelling scores with
//!   per-exercise completion notes
//! - **Smart adjustment**: exercises are nudged up or down from the two most
//!   recent progress entries (see `injury-intelligence`)
//! - **AI analysis**: injury analysis, recovery plan drafts, and progress
//!   reviews through an `OpenAI`-compatible API
//!
//! ## Architecture
//!
//! - **Config**: environment-driven settings
//! - **Database**: `SQLite` document store with one manager per collection
//! - **LLM**: provider trait plus an `OpenAI`-compatible client and prompts
//! - **Services**: adjustment orchestration and injury analysis
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use injury_tracker::config::AppConfig;
//! use injury_tracker::database::Database;
//! use injury_tracker::errors::AppResult;
//! use injury_tracker::services::SmartAdjustmentService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let database = Database::new(&config.database_url).await?;
//!     let service = SmartAdjustmentService::new(database);
//!     let outcome = service.run("injury-id").await?;
//!     println!("{}", outcome.adjustment_summary);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and environment defaults
pub mod constants;

/// `SQLite` persistence for injuries, progress, plans, and alerts
pub mod database;

/// Unified error handling
pub mod errors;

/// LLM provider abstraction and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain services
pub mod services;

pub use injury_core::{formatters, models};
pub use injury_intelligence as intelligence;
