// ABOUTME: Alert storage: creation, per-injury listing, and read tracking
// ABOUTME: Exposes an insert helper usable inside another manager's transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::models::{Alert, AlertType};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{format_timestamp, now, parse_timestamp};
use crate::errors::{database_error, AppError, AppResult};

/// Database manager for alerts
pub struct AlertManager {
    pool: SqlitePool,
}

impl AlertManager {
    /// Create a new alert manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an unread alert for an injury
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(
        &self,
        injury_id: &str,
        alert_type: AlertType,
        message: &str,
        action: Option<&str>,
    ) -> AppResult<Alert> {
        let alert = new_alert(injury_id, alert_type, message, action);
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| database_error("acquire connection", &e))?;
        insert_alert(&mut conn, &alert).await?;
        Ok(alert)
    }

    /// Get an alert by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, alert_id: &str) -> AppResult<Option<Alert>> {
        let row = sqlx::query(
            r"
            SELECT id, injury_id, alert_type, message, created_at, read, action
            FROM alerts
            WHERE id = $1
            ",
        )
        .bind(alert_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("get alert", &e))?;

        row.map(|r| row_to_alert(&r)).transpose()
    }

    /// Alerts for an injury, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_injury(&self, injury_id: &str) -> AppResult<Vec<Alert>> {
        let rows = sqlx::query(
            r"
            SELECT id, injury_id, alert_type, message, created_at, read, action
            FROM alerts
            WHERE injury_id = $1
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(injury_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list alerts", &e))?;

        rows.iter().map(row_to_alert).collect()
    }

    /// Mark an alert as read
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no alert has this id.
    pub async fn mark_read(&self, alert_id: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE alerts SET read = 1 WHERE id = $1")
            .bind(alert_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("mark alert read", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Alert").with_resource_id(alert_id));
        }
        Ok(())
    }
}

pub(super) fn new_alert(
    injury_id: &str,
    alert_type: AlertType,
    message: &str,
    action: Option<&str>,
) -> Alert {
    Alert {
        id: Uuid::new_v4().to_string(),
        injury_id: injury_id.to_owned(),
        alert_type,
        message: message.to_owned(),
        created_at: now(),
        read: false,
        action: action.map(ToOwned::to_owned),
    }
}

pub(super) async fn insert_alert(conn: &mut SqliteConnection, alert: &Alert) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO alerts (id, injury_id, alert_type, message, created_at, read, action)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(&alert.id)
    .bind(&alert.injury_id)
    .bind(alert.alert_type.as_str())
    .bind(&alert.message)
    .bind(format_timestamp(&alert.created_at))
    .bind(alert.read)
    .bind(alert.action.as_deref())
    .execute(conn)
    .await
    .map_err(|e| database_error("create alert", &e))?;
    Ok(())
}

fn row_to_alert(row: &SqliteRow) -> AppResult<Alert> {
    let alert_type_str: String = row.get("alert_type");
    let created_at_str: String = row.get("created_at");

    Ok(Alert {
        id: row.get("id"),
        injury_id: row.get("injury_id"),
        alert_type: AlertType::parse(&alert_type_str),
        message: row.get("message"),
        created_at: parse_timestamp(&created_at_str)?,
        read: row.get("read"),
        action: row.get("action"),
    })
}
