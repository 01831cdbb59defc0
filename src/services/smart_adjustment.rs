// ABOUTME: Smart exercise adjustment workflow for a single injury
// ABOUTME: Loads the current plan and recent progress, runs the engine, and persists the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use injury_core::constants::adjustment::{
    MIN_PROGRESS_ENTRIES_FOR_ADJUSTMENT, SMART_ADJUSTMENT_HISTORY_LIMIT,
};
use injury_core::constants::messages::{INSUFFICIENT_PROGRESS, NO_RECOVERY_PLAN};
use injury_core::models::Exercise;
use injury_intelligence::{AdjustmentEngine, ExerciseDecision};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::database::Database;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Result of a completed adjustment run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartAdjustmentOutcome {
    /// The plan's exercises after adjustment, in plan order
    pub exercises: Vec<Exercise>,
    /// Human-readable summary of what changed
    pub adjustment_summary: String,
    /// When the plan was updated
    pub last_adjusted: DateTime<Utc>,
    /// Per-exercise decisions behind the summary
    pub decisions: Vec<ExerciseDecision>,
}

impl SmartAdjustmentOutcome {
    /// Whether any exercise was changed
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.decisions.iter().any(|d| d.adjustment.is_change())
    }
}

/// Runs the adjustment engine against stored plans and progress
///
/// Runs for the same injury are serialised within one service instance.
/// The lock does not reach other processes sharing the database file, so the
/// plan write also checks that the plan is unchanged since it was read and
/// fails with `ResourceLocked` otherwise.
pub struct SmartAdjustmentService {
    database: Database,
    engine: AdjustmentEngine,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SmartAdjustmentService {
    /// Service using the default engine thresholds
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self::with_engine(database, AdjustmentEngine::new())
    }

    /// Service using a tuned engine
    #[must_use]
    pub fn with_engine(database: Database, engine: AdjustmentEngine) -> Self {
        Self {
            database,
            engine,
            locks: DashMap::new(),
        }
    }

    /// Adjust the current recovery plan of an injury
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the injury has no plan or the plan has
    /// no exercises, `InsufficientData` when fewer than two progress entries
    /// exist, or a database error from loading or saving.
    #[instrument(skip(self), fields(injury_id = %injury_id))]
    pub async fn run(&self, injury_id: &str) -> AppResult<SmartAdjustmentOutcome> {
        let lock = self.lock_for(injury_id);
        let result = {
            let _guard = lock.lock().await;
            self.adjust(injury_id).await
        };
        drop(lock);
        self.release_lock(injury_id);
        result
    }

    async fn adjust(&self, injury_id: &str) -> AppResult<SmartAdjustmentOutcome> {
        let plans = self.database.recovery_plans();
        let plan = plans
            .latest_for_injury(injury_id)
            .await?
            .filter(|plan| !plan.exercises.is_empty())
            .ok_or_else(|| {
                AppError::new(ErrorCode::ResourceNotFound, NO_RECOVERY_PLAN)
                    .with_resource_id(injury_id)
            })?;

        let history = self
            .database
            .progress()
            .recent_for_adjustment(injury_id, SMART_ADJUSTMENT_HISTORY_LIMIT)
            .await?;
        if history.len() < MIN_PROGRESS_ENTRIES_FOR_ADJUSTMENT {
            warn!(entries = history.len(), "Not enough progress for adjustment");
            return Err(AppError::insufficient_data(INSUFFICIENT_PROGRESS).with_resource_id(injury_id));
        }

        let program = self.engine.generate_program(&plan.exercises, &history);
        let updated = plans
            .update_with_exercises(&plan, &program.exercises, &program.adjustment_summary)
            .await?;

        let last_adjusted = updated.last_adjusted.unwrap_or(updated.updated_at);
        info!(
            plan_id = %updated.id,
            changed = program.has_changes(),
            entries = history.len(),
            "Smart adjustment applied"
        );

        Ok(SmartAdjustmentOutcome {
            exercises: program.exercises,
            adjustment_summary: program.adjustment_summary,
            last_adjusted,
            decisions: program.decisions,
        })
    }

    fn lock_for(&self, injury_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(injury_id.to_owned())
            .or_default()
            .value()
            .clone()
    }

    /// Drop the lock entry once no other run is holding or waiting on it
    fn release_lock(&self, injury_id: &str) {
        self.locks
            .remove_if(injury_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
