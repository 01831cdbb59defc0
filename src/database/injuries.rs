// ABOUTME: Injury report persistence with per-user ownership checks
// ABOUTME: Deleting an injury removes its progress, plans, and alerts in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::constants::messages::ACCESS_DENIED;
use injury_core::models::{Injury, InjuryDetails, InjuryStatus};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::{format_timestamp, now, parse_timestamp};
use crate::errors::{database_error, AppError, AppResult};

const SELECT_INJURY: &str = r"
    SELECT id, user_id, body_part, cause, date, sport, symptoms,
           possible_injuries, status, created_at, updated_at
    FROM injuries
";

/// Database manager for injury reports
pub struct InjuryManager {
    pool: SqlitePool,
}

impl InjuryManager {
    /// Create a new injury manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new injury report for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the report fails validation or the insert fails.
    pub async fn add(
        &self,
        user_id: &str,
        details: &InjuryDetails,
        possible_injuries: Vec<String>,
    ) -> AppResult<Injury> {
        if user_id.trim().is_empty() {
            return Err(AppError::auth_required());
        }
        details.validate()?;

        let created_at = now();
        let injury = Injury {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            body_part: details.body_part.trim().to_owned(),
            cause: details.cause.trim().to_owned(),
            date: details.date,
            sport: details.sport.trim().to_owned(),
            symptoms: details.symptoms.clone(),
            possible_injuries,
            status: InjuryStatus::Active,
            created_at,
            updated_at: created_at,
        };

        sqlx::query(
            r"
            INSERT INTO injuries (id, user_id, body_part, cause, date, sport, symptoms,
                                  possible_injuries, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(&injury.id)
        .bind(&injury.user_id)
        .bind(&injury.body_part)
        .bind(&injury.cause)
        .bind(format_timestamp(&injury.date))
        .bind(&injury.sport)
        .bind(serde_json::to_string(&injury.symptoms)?)
        .bind(serde_json::to_string(&injury.possible_injuries)?)
        .bind(injury.status.as_str())
        .bind(format_timestamp(&injury.created_at))
        .bind(format_timestamp(&injury.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("create injury", &e))?;

        info!(injury_id = %injury.id, user_id = %injury.user_id, "Injury reported");
        Ok(injury)
    }

    /// Get an injury by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, injury_id: &str) -> AppResult<Option<Injury>> {
        let row = sqlx::query(&format!("{SELECT_INJURY} WHERE id = $1"))
            .bind(injury_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("get injury", &e))?;

        row.map(|r| row_to_injury(&r)).transpose()
    }

    /// Get an injury that must belong to `user_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the injury does not exist and
    /// `PermissionDenied` when another user owns it.
    pub async fn get_owned(&self, user_id: &str, injury_id: &str) -> AppResult<Injury> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| database_error("acquire connection", &e))?;
        fetch_owned(&mut conn, user_id, injury_id).await
    }

    /// List a user's injuries, most recently reported first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Injury>> {
        let rows = sqlx::query(&format!(
            "{SELECT_INJURY} WHERE user_id = $1 ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list injuries", &e))?;

        rows.iter().map(row_to_injury).collect()
    }

    /// Change the lifecycle status of a user's injury
    ///
    /// # Errors
    ///
    /// Returns an error if the injury is missing, owned by someone else, or
    /// the update fails.
    pub async fn update_status(
        &self,
        user_id: &str,
        injury_id: &str,
        status: InjuryStatus,
    ) -> AppResult<Injury> {
        let mut injury = self.get_owned(user_id, injury_id).await?;
        injury.status = status;
        injury.updated_at = now();

        sqlx::query("UPDATE injuries SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(format_timestamp(&injury.updated_at))
            .bind(injury_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("update injury status", &e))?;

        Ok(injury)
    }

    /// Delete a user's injury together with everything attached to it
    ///
    /// # Errors
    ///
    /// Returns an error if the injury is missing, owned by someone else, or
    /// any delete fails (in which case nothing is removed).
    pub async fn delete(&self, user_id: &str, injury_id: &str) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin transaction", &e))?;
        fetch_owned(&mut tx, user_id, injury_id).await?;

        for statement in [
            "DELETE FROM progress WHERE injury_id = $1",
            "DELETE FROM recovery_plans WHERE injury_id = $1",
            "DELETE FROM alerts WHERE injury_id = $1",
            "DELETE FROM injuries WHERE id = $1",
        ] {
            sqlx::query(statement)
                .bind(injury_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| database_error("delete injury", &e))?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("commit injury deletion", &e))?;

        info!(injury_id = %injury_id, "Injury and related records deleted");
        Ok(())
    }
}

/// Load an injury on `conn` and check that `user_id` owns it
pub(super) async fn fetch_owned(
    conn: &mut SqliteConnection,
    user_id: &str,
    injury_id: &str,
) -> AppResult<Injury> {
    let injury = sqlx::query(&format!("{SELECT_INJURY} WHERE id = $1"))
        .bind(injury_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| database_error("get injury", &e))?
        .map(|r| row_to_injury(&r))
        .transpose()?
        .ok_or_else(|| AppError::not_found("Injury").with_resource_id(injury_id))?;

    if injury.is_owned_by(user_id) {
        Ok(injury)
    } else {
        Err(AppError::permission_denied(ACCESS_DENIED)
            .with_user_id(user_id)
            .with_resource_id(injury_id))
    }
}

fn row_to_injury(row: &SqliteRow) -> AppResult<Injury> {
    let symptoms_json: String = row.get("symptoms");
    let possible_injuries_json: String = row.get("possible_injuries");
    let status_str: String = row.get("status");
    let date_str: String = row.get("date");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(Injury {
        id: row.get("id"),
        user_id: row.get("user_id"),
        body_part: row.get("body_part"),
        cause: row.get("cause"),
        date: parse_timestamp(&date_str)?,
        sport: row.get("sport"),
        symptoms: serde_json::from_str(&symptoms_json)?,
        possible_injuries: serde_json::from_str(&possible_injuries_json)?,
        status: status_str.parse()?,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}
