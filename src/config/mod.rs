// ABOUTME: Configuration management module for the injury tracker
// ABOUTME: Re-exports environment-driven application settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Configuration module
//!
//! - **Environment**: database, LLM, logging, and adjustment settings read
//!   from environment variables

/// Environment and application configuration
pub mod environment;

pub use environment::{AppConfig, DatabaseUrl, Environment, LlmConfig, LogLevel};
