// ABOUTME: Smart program generation over a whole recovery plan
// ABOUTME: Runs estimate, decide, and apply per exercise and builds the change summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use serde::{Deserialize, Serialize};
use tracing::debug;

use injury_core::models::{AdjustmentType, Exercise, ProgressEntry};

use crate::config::{AdjustmentEngineConfig, AdjustmentMessages};
use crate::decision::{decide_with, DecisionRule};
use crate::mutator::apply_with;

/// What happened to one exercise during program generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDecision {
    /// Exercise display name
    pub name: String,
    /// Chosen adjustment
    pub adjustment: AdjustmentType,
    /// Rule that chose it
    pub rule: DecisionRule,
    /// Sets before
    pub previous_sets: u32,
    /// Reps before
    pub previous_reps: u32,
    /// Sets after
    pub new_sets: u32,
    /// Reps after
    pub new_reps: u32,
}

impl ExerciseDecision {
    /// Summary line, e.g. `• Bridge: Increased intensity (3x10 → 3x12)`
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "• {}: {} intensity ({}x{} → {}x{})",
            self.name,
            self.adjustment.past_tense(),
            self.previous_sets,
            self.previous_reps,
            self.new_sets,
            self.new_reps
        )
    }
}

/// Result of running the engine over a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedProgram {
    /// Adjusted exercises, same length and order as the input
    pub exercises: Vec<Exercise>,
    /// Human-readable summary of the changes
    pub adjustment_summary: String,
    /// Per-exercise decisions, same order as `exercises`
    pub decisions: Vec<ExerciseDecision>,
}

impl AdjustedProgram {
    /// Whether any exercise changed
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.decisions
            .iter()
            .any(|decision| decision.adjustment.is_change())
    }
}

/// Adjust every exercise in a plan using the default configuration
///
/// Callers that require a minimum amount of history should enforce it before
/// calling; with too little history every exercise is maintained.
#[must_use]
pub fn generate_smart_program(exercises: &[Exercise], history: &[ProgressEntry]) -> AdjustedProgram {
    generate_with(exercises, history, AdjustmentEngineConfig::defaults())
}

pub(crate) fn generate_with(
    exercises: &[Exercise],
    history: &[ProgressEntry],
    config: &AdjustmentEngineConfig,
) -> AdjustedProgram {
    let mut adjusted = Vec::with_capacity(exercises.len());
    let mut decisions = Vec::with_capacity(exercises.len());

    for exercise in exercises {
        let decision = decide_with(exercise, history, config);
        let updated = apply_with(
            exercise,
            decision.adjustment,
            &config.progression,
            &config.messages,
        );

        if decision.adjustment.is_change() {
            debug!(
                exercise = %exercise.name,
                adjustment = decision.adjustment.as_str(),
                rule = %decision.rule,
                from = %format!("{}x{}", exercise.sets, exercise.reps),
                to = %format!("{}x{}", updated.sets, updated.reps),
                "Exercise adjusted"
            );
        }

        decisions.push(ExerciseDecision {
            name: exercise.name.clone(),
            adjustment: decision.adjustment,
            rule: decision.rule,
            previous_sets: exercise.sets,
            previous_reps: exercise.reps,
            new_sets: updated.sets,
            new_reps: updated.reps,
        });
        adjusted.push(updated);
    }

    let adjustment_summary = summarize(&decisions, &config.messages);
    AdjustedProgram {
        exercises: adjusted,
        adjustment_summary,
        decisions,
    }
}

fn summarize(decisions: &[ExerciseDecision], messages: &AdjustmentMessages) -> String {
    let lines: Vec<String> = decisions
        .iter()
        .filter(|decision| decision.adjustment.is_change())
        .map(ExerciseDecision::summary_line)
        .collect();

    if lines.is_empty() {
        messages.unchanged_summary.clone()
    } else {
        format!("{}\n{}", messages.summary_header, lines.join("\n"))
    }
}
