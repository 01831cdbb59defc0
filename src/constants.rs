// ABOUTME: Application constants: domain values from the core crate plus environment defaults
// ABOUTME: Groups defaults for database, LLM, and logging configuration by concern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # Constants Module
//!
//! Domain constants are re-exported from `injury-core`; the modules below hold
//! the defaults used when an environment variable is not set.

pub use injury_core::constants::{adjustment, messages, scales, service_names};

/// Environment variable defaults
pub mod defaults {
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/injuries.db";
    /// Default OpenAI-compatible API base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default chat model
    pub const OPENAI_MODEL: &str = "gpt-4";
    /// Default sampling temperature
    pub const OPENAI_TEMPERATURE: f32 = 0.7;
    /// Default log level
    pub const LOG_LEVEL: &str = "info";
}

/// HTTP client timeouts for LLM requests
pub mod timeouts {
    /// Connection establishment timeout in seconds
    pub const LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Whole-request timeout in seconds
    pub const LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Environment variable names
pub mod env_vars {
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// API key for the OpenAI-compatible endpoint
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Base URL for the OpenAI-compatible endpoint
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Chat model name
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Sampling temperature
    pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log output format
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
