// ABOUTME: Append-only progress entry storage for an injury
// ABOUTME: Ids and timestamps are assigned here, never taken from the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::models::{NewProgressEntry, ProgressEntry};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::injuries::fetch_owned;
use super::{format_timestamp, now, parse_timestamp, InjuryManager};
use crate::errors::{database_error, AppError, AppResult};

const SELECT_PROGRESS: &str = r"
    SELECT id, user_id, injury_id, date, pain_level, mobility, swelling, notes, exercises
    FROM progress
";

/// Database manager for progress entries
pub struct ProgressManager {
    pool: SqlitePool,
}

impl ProgressManager {
    /// Create a new progress manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a progress entry for an injury owned by the reporting user
    ///
    /// # Errors
    ///
    /// Returns an error if a score is out of range, the injury is missing or
    /// belongs to another user, or the insert fails.
    pub async fn add(&self, entry: NewProgressEntry) -> AppResult<ProgressEntry> {
        entry.validate()?;

        // Ownership check and insert share a transaction so a concurrent
        // delete cannot leave an orphaned entry
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin transaction", &e))?;
        fetch_owned(&mut tx, &entry.user_id, &entry.injury_id).await?;

        let entry = entry.into_entry(Uuid::new_v4().to_string(), now());

        sqlx::query(
            r"
            INSERT INTO progress (id, user_id, injury_id, date, pain_level, mobility,
                                  swelling, notes, exercises)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.injury_id)
        .bind(format_timestamp(&entry.date))
        .bind(i64::from(entry.pain_level))
        .bind(i64::from(entry.mobility))
        .bind(i64::from(entry.swelling))
        .bind(&entry.notes)
        .bind(serde_json::to_string(&entry.exercises)?)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("create progress entry", &e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("commit progress entry", &e))?;

        debug!(injury_id = %entry.injury_id, pain = entry.pain_level, "Progress entry recorded");
        Ok(entry)
    }

    /// All entries for a user's injury, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the injury is missing, owned by someone else, or
    /// the query fails.
    pub async fn list_for_injury(
        &self,
        user_id: &str,
        injury_id: &str,
    ) -> AppResult<Vec<ProgressEntry>> {
        InjuryManager::new(self.pool.clone())
            .get_owned(user_id, injury_id)
            .await?;

        let rows = sqlx::query(&format!(
            "{SELECT_PROGRESS} WHERE injury_id = $1 ORDER BY date ASC, rowid ASC"
        ))
        .bind(injury_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list progress entries", &e))?;

        rows.iter().map(row_to_progress).collect()
    }

    /// The `limit` most recent entries for an injury, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn recent_for_adjustment(
        &self,
        injury_id: &str,
        limit: u32,
    ) -> AppResult<Vec<ProgressEntry>> {
        let rows = sqlx::query(&format!(
            "{SELECT_PROGRESS} WHERE injury_id = $1 ORDER BY date DESC, rowid DESC LIMIT $2"
        ))
        .bind(injury_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("fetch recent progress entries", &e))?;

        rows.iter().map(row_to_progress).collect()
    }
}

fn row_to_progress(row: &SqliteRow) -> AppResult<ProgressEntry> {
    let date_str: String = row.get("date");
    let exercises_json: String = row.get("exercises");

    Ok(ProgressEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        injury_id: row.get("injury_id"),
        date: parse_timestamp(&date_str)?,
        pain_level: score_column(row, "pain_level")?,
        mobility: score_column(row, "mobility")?,
        swelling: score_column(row, "swelling")?,
        notes: row.get("notes"),
        exercises: serde_json::from_str(&exercises_json)?,
    })
}

/// Read a 1-10 score column, rejecting values that do not fit a `u8`
fn score_column(row: &SqliteRow, column: &str) -> AppResult<u8> {
    let value: i64 = row.get(column);
    u8::try_from(value)
        .map_err(|_| AppError::internal(format!("Stored {column} {value} is not a valid score")))
}
