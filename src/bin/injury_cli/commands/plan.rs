// ABOUTME: Recovery plan commands for injury-cli
// ABOUTME: Creates plans from JSON, shows them, runs smart adjustment, and prints adjustment history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_tracker::errors::{AppError, AppResult, ErrorCode};
use injury_tracker::intelligence::AdjustmentEngine;
use injury_tracker::models::{Exercise, NewRecoveryPlan, RecoveryPlan};
use injury_tracker::services::SmartAdjustmentService;
use tokio::fs;
use tracing::info;

use super::CliContext;
use crate::helpers::display::{display_adjustment_history, display_adjustment_outcome, display_plan};

/// Create a recovery plan from a JSON exercise list
pub async fn create(
    ctx: &CliContext,
    injury_id: &str,
    path: &str,
    timeline: String,
) -> AppResult<()> {
    ctx.owned_injury(injury_id).await?;

    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::invalid_input(format!("Cannot read {path}: {e}")))?;
    let exercises: Vec<Exercise> = serde_json::from_str(&raw)
        .map_err(|e| AppError::invalid_input(format!("Invalid exercise list in {path}: {e}")))?;
    if exercises.is_empty() {
        return Err(AppError::invalid_input("The exercise list is empty"));
    }

    let plan = ctx
        .database
        .recovery_plans()
        .add(NewRecoveryPlan {
            injury_id: injury_id.to_owned(),
            exercises,
            timeline,
            milestones: Vec::new(),
        })
        .await?;

    println!("Recovery plan created: {}", plan.id);
    display_plan(&plan);
    Ok(())
}

/// Show the current recovery plan
pub async fn show(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let plan = current_plan(ctx, injury_id).await?;
    display_plan(&plan);
    Ok(())
}

/// Adjust the current plan from the latest progress entries
pub async fn adjust(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    ctx.owned_injury(injury_id).await?;

    let engine = AdjustmentEngine::with_config(ctx.config.adjustment.clone())
        .map_err(|e| AppError::new(ErrorCode::ConfigInvalid, e.to_string()))?;
    let service = SmartAdjustmentService::with_engine(ctx.database.clone(), engine);

    let outcome = service.run(injury_id).await?;
    info!(changed = outcome.has_changes(), "Plan adjusted for injury {injury_id}");
    display_adjustment_outcome(&outcome);
    Ok(())
}

/// Print every recorded adjustment of the current plan
pub async fn history(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let plan = current_plan(ctx, injury_id).await?;
    display_adjustment_history(&plan.adjustment_history);
    Ok(())
}

async fn current_plan(ctx: &CliContext, injury_id: &str) -> AppResult<RecoveryPlan> {
    ctx.owned_injury(injury_id).await?;
    ctx.database
        .recovery_plans()
        .latest_for_injury(injury_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recovery plan").with_resource_id(injury_id))
}
