// ABOUTME: SQLite-backed document store for injuries, progress, recovery plans, and alerts
// ABOUTME: Owns the connection pool, runs idempotent migrations, and hands out per-collection managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # Database Management
//!
//! Each collection is a table keyed by a generated id. Nested arrays
//! (symptoms, exercises, milestones, adjustment history) are stored as JSON
//! text so that documents round-trip unchanged. Timestamps are RFC 3339 text
//! with fixed microsecond precision, which keeps lexical order equal to
//! chronological order.

mod alerts;
mod injuries;
mod progress;
mod recovery_plans;

pub use alerts::AlertManager;
pub use injuries::InjuryManager;
pub use progress::ProgressManager;
pub use recovery_plans::RecoveryPlanManager;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{database_error, AppError, AppResult};

/// Database handle shared by the services and the CLI
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// File databases are created on first use, including missing parent
    /// directories. In-memory databases use a single long-lived connection so
    /// every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the connection
    /// fails, or a migration fails.
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url.to_connection_string())
                .await
                .map_err(|e| database_error("open in-memory database", &e))?,
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                // Ensure SQLite creates the database file if it doesn't exist
                let connection_options = format!("{}?mode=rwc", url.to_connection_string());
                SqlitePool::connect(&connection_options)
                    .await
                    .map_err(|e| database_error("open database", &e))?
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {url}");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Injury reports
    #[must_use]
    pub fn injuries(&self) -> InjuryManager {
        InjuryManager::new(self.pool.clone())
    }

    /// Progress entries
    #[must_use]
    pub fn progress(&self) -> ProgressManager {
        ProgressManager::new(self.pool.clone())
    }

    /// Recovery plans
    #[must_use]
    pub fn recovery_plans(&self) -> RecoveryPlanManager {
        RecoveryPlanManager::new(self.pool.clone())
    }

    /// Alerts
    #[must_use]
    pub fn alerts(&self) -> AlertManager {
        AlertManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        const STATEMENTS: [&str; 8] = [
            r"
            CREATE TABLE IF NOT EXISTS injuries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                body_part TEXT NOT NULL,
                cause TEXT NOT NULL,
                date TEXT NOT NULL,
                sport TEXT NOT NULL,
                symptoms TEXT NOT NULL, -- JSON array
                possible_injuries TEXT NOT NULL DEFAULT '[]', -- JSON array
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_injuries_user ON injuries(user_id, created_at)",
            r"
            CREATE TABLE IF NOT EXISTS progress (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                injury_id TEXT NOT NULL,
                date TEXT NOT NULL,
                pain_level INTEGER NOT NULL,
                mobility INTEGER NOT NULL,
                swelling INTEGER NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                exercises TEXT NOT NULL DEFAULT '[]' -- JSON array
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_progress_injury ON progress(injury_id, date)",
            r"
            CREATE TABLE IF NOT EXISTS recovery_plans (
                id TEXT PRIMARY KEY,
                injury_id TEXT NOT NULL,
                exercises TEXT NOT NULL, -- JSON array
                timeline TEXT NOT NULL DEFAULT '',
                milestones TEXT NOT NULL DEFAULT '[]', -- JSON array
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                last_adjusted TEXT,
                adjustment_history TEXT NOT NULL DEFAULT '[]' -- JSON array
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_recovery_plans_injury ON recovery_plans(injury_id, created_at)",
            r"
            CREATE TABLE IF NOT EXISTS alerts (
                id TEXT PRIMARY KEY,
                injury_id TEXT NOT NULL,
                alert_type TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL,
                read BOOLEAN NOT NULL DEFAULT 0,
                action TEXT
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_alerts_injury ON alerts(injury_id, created_at)",
        ];

        for statement in STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| database_error("run migration", &e))?;
        }
        debug!("Migrations applied");
        Ok(())
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}

/// Current time at the precision stored in the database
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}
