// ABOUTME: Applies an adjustment decision to an exercise prescription
// ABOUTME: Grows or shrinks sets and reps within floors and ceilings and annotates notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::models::{AdjustmentType, Exercise};

use crate::config::{AdjustmentEngineConfig, AdjustmentMessages, ProgressionRules};

/// Apply a decision to an exercise using the default progression rules
///
/// Returns a new value; the input is never modified. `Maintain` yields an
/// equal copy.
#[must_use]
pub fn adjust_exercise(exercise: &Exercise, adjustment: AdjustmentType) -> Exercise {
    let config = AdjustmentEngineConfig::defaults();
    apply_with(exercise, adjustment, &config.progression, &config.messages)
}

pub(crate) fn apply_with(
    exercise: &Exercise,
    adjustment: AdjustmentType,
    rules: &ProgressionRules,
    messages: &AdjustmentMessages,
) -> Exercise {
    let mut adjusted = exercise.clone();
    match adjustment {
        AdjustmentType::Maintain => {}
        AdjustmentType::Increase => {
            if exercise.reps >= rules.set_progression_reps {
                adjusted.sets = rules.max_sets.min(exercise.sets.saturating_add(1));
                adjusted.reps = rules
                    .set_progression_min_reps
                    .max(percent_of(exercise.reps, rules.set_progression_reps_percent));
            } else {
                adjusted.reps = rules
                    .max_reps
                    .min(percent_of(exercise.reps, rules.increase_reps_percent));
            }
            adjusted.notes = Some(append_note(exercise.notes.as_deref(), &messages.increase_note));
        }
        AdjustmentType::Decrease => {
            adjusted.reps = rules
                .min_reps
                .max(percent_of(exercise.reps, rules.decrease_reps_percent));
            if exercise.sets > rules.min_sets {
                adjusted.sets = rules.min_sets.max(exercise.sets - 1);
            }
            adjusted.notes = Some(append_note(exercise.notes.as_deref(), &messages.decrease_note));
        }
    }
    adjusted
}

/// Floor of `value * percent / 100`
fn percent_of(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

fn append_note(existing: Option<&str>, fragment: &str) -> String {
    format!("{} {fragment}", existing.unwrap_or_default())
        .trim()
        .to_owned()
}
