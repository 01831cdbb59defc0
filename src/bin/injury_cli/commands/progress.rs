// ABOUTME: Progress commands for injury-cli
// ABOUTME: Records daily pain/mobility/swelling entries and lists an injury's history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use std::slice;

use injury_tracker::errors::{AppError, AppResult};
use injury_tracker::models::{CompletedExercise, NewProgressEntry};

use super::CliContext;
use crate::helpers::display::display_progress;

/// Arguments of `progress log`
pub struct LogArgs {
    pub pain: u8,
    pub mobility: u8,
    pub swelling: u8,
    pub notes: String,
    pub exercises: Vec<String>,
}

/// Record a progress entry
pub async fn log(ctx: &CliContext, injury_id: &str, args: LogArgs) -> AppResult<()> {
    let exercises = args
        .exercises
        .iter()
        .map(String::as_str)
        .map(parse_completed_exercise)
        .collect::<AppResult<Vec<_>>>()?;

    let entry = ctx
        .database
        .progress()
        .add(NewProgressEntry {
            user_id: ctx.user_id.clone(),
            injury_id: injury_id.to_owned(),
            pain_level: args.pain,
            mobility: args.mobility,
            swelling: args.swelling,
            notes: args.notes,
            exercises,
        })
        .await?;

    println!("Progress recorded: {}", entry.id);
    display_progress(slice::from_ref(&entry));
    Ok(())
}

/// List an injury's progress entries
pub async fn list(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let entries = ctx
        .database
        .progress()
        .list_for_injury(&ctx.user_id, injury_id)
        .await?;
    display_progress(&entries);
    Ok(())
}

/// Parse `NAME:DIFFICULTY`; the name may itself contain colons
fn parse_completed_exercise(raw: &str) -> AppResult<CompletedExercise> {
    let (name, difficulty) = raw
        .rsplit_once(':')
        .ok_or_else(|| AppError::invalid_input(format!("Expected NAME:DIFFICULTY, got '{raw}'")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::missing_field("Exercise name"));
    }
    let difficulty: u8 = difficulty.trim().parse().map_err(|_| {
        AppError::invalid_input(format!("Difficulty must be a number from 1 to 10, got '{difficulty}'"))
    })?;

    Ok(CompletedExercise::new(name, true, difficulty))
}
