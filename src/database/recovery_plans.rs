// ABOUTME: Recovery plan storage with exercise adjustment history
// ABOUTME: Plan updates record per-exercise changes and raise an adjustment alert atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::constants::adjustment::ADJUSTMENT_ALERT_ACTION;
use injury_core::constants::messages::PLAN_CHANGED_CONCURRENTLY;
use injury_core::models::{AlertType, Exercise, ExerciseAdjustment, NewRecoveryPlan, RecoveryPlan};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::alerts::{insert_alert, new_alert};
use super::{format_timestamp, now, parse_timestamp};
use crate::errors::{database_error, AppError, AppResult, ErrorCode};

const SELECT_PLAN: &str = r"
    SELECT id, injury_id, exercises, timeline, milestones, created_at, updated_at,
           last_adjusted, adjustment_history
    FROM recovery_plans
";

/// Database manager for recovery plans
pub struct RecoveryPlanManager {
    pool: SqlitePool,
}

impl RecoveryPlanManager {
    /// Create a new recovery plan manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new plan; it becomes the injury's current plan
    ///
    /// # Errors
    ///
    /// Returns an error if an exercise is invalid or the insert fails.
    pub async fn add(&self, plan: NewRecoveryPlan) -> AppResult<RecoveryPlan> {
        for exercise in &plan.exercises {
            exercise.validate()?;
        }

        let created_at = now();
        let plan = RecoveryPlan {
            id: Uuid::new_v4().to_string(),
            injury_id: plan.injury_id,
            exercises: plan.exercises,
            timeline: plan.timeline,
            milestones: plan.milestones,
            created_at,
            updated_at: created_at,
            last_adjusted: None,
            adjustment_history: Vec::new(),
        };

        sqlx::query(
            r"
            INSERT INTO recovery_plans (id, injury_id, exercises, timeline, milestones,
                                        created_at, updated_at, last_adjusted, adjustment_history)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, '[]')
            ",
        )
        .bind(&plan.id)
        .bind(&plan.injury_id)
        .bind(serde_json::to_string(&plan.exercises)?)
        .bind(&plan.timeline)
        .bind(serde_json::to_string(&plan.milestones)?)
        .bind(format_timestamp(&plan.created_at))
        .bind(format_timestamp(&plan.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("create recovery plan", &e))?;

        info!(plan_id = %plan.id, injury_id = %plan.injury_id, exercises = plan.exercises.len(), "Recovery plan created");
        Ok(plan)
    }

    /// Get a plan by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, plan_id: &str) -> AppResult<Option<RecoveryPlan>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| database_error("acquire connection", &e))?;
        fetch_plan(&mut conn, plan_id).await
    }

    /// The most recently created plan for an injury
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn latest_for_injury(&self, injury_id: &str) -> AppResult<Option<RecoveryPlan>> {
        let row = sqlx::query(&format!(
            "{SELECT_PLAN} WHERE injury_id = $1 ORDER BY created_at DESC, rowid DESC LIMIT 1"
        ))
        .bind(injury_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("get latest recovery plan", &e))?;

        row.map(|r| row_to_plan(&r)).transpose()
    }

    /// Replace a plan's exercises after an adjustment computed from `base`
    ///
    /// Appends one history record per new exercise, compared with the stored
    /// exercise at the same position, and stamps `last_adjusted`. A non-empty
    /// `summary` also becomes an unread adjustment alert. Everything is
    /// written in a single transaction, and only if the stored plan still
    /// carries `base.updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the plan does not exist, `ResourceLocked`
    /// if it changed since `base` was read (another process adjusted it), or a
    /// database error if any write fails. Nothing is persisted on error.
    pub async fn update_with_exercises(
        &self,
        base: &RecoveryPlan,
        exercises: &[Exercise],
        summary: &str,
    ) -> AppResult<RecoveryPlan> {
        let plan_id = base.id.as_str();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin transaction", &e))?;

        let mut plan = fetch_plan(&mut tx, plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recovery plan").with_resource_id(plan_id))?;
        if plan.updated_at != base.updated_at {
            return Err(plan_changed(plan_id));
        }

        let expected_updated_at = format_timestamp(&base.updated_at);
        let adjusted_at = now();
        plan.adjustment_history.extend(
            exercises
                .iter()
                .enumerate()
                .map(|(index, exercise)| {
                    ExerciseAdjustment::between(plan.exercises.get(index), exercise, adjusted_at)
                }),
        );
        plan.exercises = exercises.to_vec();
        plan.last_adjusted = Some(adjusted_at);
        plan.updated_at = adjusted_at;

        let result = sqlx::query(
            r"
            UPDATE recovery_plans
            SET exercises = $1, last_adjusted = $2, updated_at = $3, adjustment_history = $4
            WHERE id = $5 AND updated_at = $6
            ",
        )
        .bind(serde_json::to_string(&plan.exercises)?)
        .bind(format_timestamp(&adjusted_at))
        .bind(format_timestamp(&adjusted_at))
        .bind(serde_json::to_string(&plan.adjustment_history)?)
        .bind(plan_id)
        .bind(&expected_updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("update recovery plan", &e))?;
        if result.rows_affected() == 0 {
            return Err(plan_changed(plan_id));
        }

        if !summary.trim().is_empty() {
            let alert = new_alert(
                &plan.injury_id,
                AlertType::Adjustment,
                summary,
                Some(ADJUSTMENT_ALERT_ACTION),
            );
            insert_alert(&mut tx, &alert).await?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("commit recovery plan update", &e))?;

        info!(plan_id = %plan_id, "Recovery plan exercises updated");
        Ok(plan)
    }
}

fn plan_changed(plan_id: &str) -> AppError {
    AppError::new(ErrorCode::ResourceLocked, PLAN_CHANGED_CONCURRENTLY).with_resource_id(plan_id)
}

async fn fetch_plan(conn: &mut SqliteConnection, plan_id: &str) -> AppResult<Option<RecoveryPlan>> {
    let row = sqlx::query(&format!("{SELECT_PLAN} WHERE id = $1"))
        .bind(plan_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| database_error("get recovery plan", &e))?;

    row.map(|r| row_to_plan(&r)).transpose()
}

fn row_to_plan(row: &SqliteRow) -> AppResult<RecoveryPlan> {
    let exercises_json: String = row.get("exercises");
    let milestones_json: String = row.get("milestones");
    let history_json: String = row.get("adjustment_history");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");
    let last_adjusted_str: Option<String> = row.get("last_adjusted");

    Ok(RecoveryPlan {
        id: row.get("id"),
        injury_id: row.get("injury_id"),
        exercises: serde_json::from_str(&exercises_json)?,
        timeline: row.get("timeline"),
        milestones: serde_json::from_str(&milestones_json)?,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
        last_adjusted: last_adjusted_str
            .as_deref()
            .map(parse_timestamp)
            .transpose()?,
        adjustment_history: serde_json::from_str(&history_json)?,
    })
}
