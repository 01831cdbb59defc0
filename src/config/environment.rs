// ABOUTME: Environment configuration management for database, LLM, and logging settings
// ABOUTME: Parses environment variables into typed configuration with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Environment-based configuration

use anyhow::{Context, Result};
use injury_intelligence::AdjustmentEngineConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use crate::constants::{defaults, env_vars};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational
    #[default]
    Info,
    /// Debugging detail
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (tests and throwaway runs)
    Memory,
}

impl DatabaseUrl {
    /// Parse a connection string
    ///
    /// Accepts `sqlite::memory:`, `sqlite:<path>`, `sqlite://<path>`, or a
    /// bare file path.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty string or a non-SQLite scheme.
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            anyhow::bail!("database URL must not be empty");
        }
        if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            return if path == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path),
                })
            };
        }
        if trimmed.contains("://") {
            anyhow::bail!("unsupported database scheme in {trimmed}; only sqlite is supported");
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Connection string understood by `sqlx`
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// File path for file-backed databases
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::SQLite { path } => Some(path.as_path()),
            Self::Memory => None,
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/injuries.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// OpenAI-compatible endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; `None` when unset or blank
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    pub base_url: String,
    /// Chat model
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl LlmConfig {
    /// Whether an API key is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::OPENAI_BASE_URL.to_owned(),
            model: defaults::OPENAI_MODEL.to_owned(),
            temperature: defaults::OPENAI_TEMPERATURE,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database location
    pub database_url: DatabaseUrl,
    /// LLM endpoint
    pub llm: LlmConfig,
    /// Adjustment engine thresholds
    pub adjustment: AdjustmentEngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self> {
        let database_url = DatabaseUrl::parse_url(&env_var_or(
            env_vars::DATABASE_URL,
            defaults::DATABASE_URL,
        ))
        .context("Invalid DATABASE_URL value")?;

        let temperature: f32 = env_var_or(
            env_vars::OPENAI_TEMPERATURE,
            &defaults::OPENAI_TEMPERATURE.to_string(),
        )
        .trim()
        .parse()
        .context("Invalid OPENAI_TEMPERATURE value")?;

        let llm = LlmConfig {
            api_key: env::var(env_vars::OPENAI_API_KEY)
                .ok()
                .map(|key| strip_whitespace(&key))
                .filter(|key| !key.is_empty()),
            base_url: env_var_or(env_vars::OPENAI_BASE_URL, defaults::OPENAI_BASE_URL),
            model: env_var_or(env_vars::OPENAI_MODEL, defaults::OPENAI_MODEL),
            temperature,
        };

        let adjustment =
            AdjustmentEngineConfig::from_env().context("Invalid adjustment engine override")?;

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or(
                env_vars::LOG_LEVEL,
                defaults::LOG_LEVEL,
            )),
            database_url,
            llm,
            adjustment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature or base URL is unusable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!(
                "OPENAI_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            );
        }
        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://")
        {
            anyhow::bail!("OPENAI_BASE_URL must be an http(s) URL");
        }
        Ok(())
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Injury Tracker Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - LLM: {} ({})\n\
             - LLM Model: {}",
            self.environment,
            self.log_level,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            if self.llm.is_configured() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.llm.base_url,
            self.llm.model,
        )
    }

    /// Log the configuration summary
    pub fn summary_log(&self) {
        for line in self.summary().lines() {
            info!("{line}");
        }
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Remove all whitespace, including newlines pasted into secrets
fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_and_file_urls() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/injuries.db").unwrap(),
            DatabaseUrl::default()
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:///tmp/x.db")
                .unwrap()
                .to_connection_string(),
            "sqlite:/tmp/x.db"
        );
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("  ").is_err());
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" sk-abc\n123 \t"), "sk-abc123");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let llm = LlmConfig {
            api_key: Some("sk-secret".to_owned()),
            ..LlmConfig::default()
        };
        let rendered = format!("{llm:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
