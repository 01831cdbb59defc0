// ABOUTME: Recovery plan documents, milestones, and exercise adjustment history
// ABOUTME: Defines the increase/decrease/maintain classification shared with the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::Exercise;
use crate::constants::adjustment::DEFAULT_ADJUSTMENT_REASON;

/// Per-exercise adjustment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    /// Make the exercise harder
    Increase,
    /// Make the exercise easier
    Decrease,
    /// Leave the exercise unchanged
    Maintain,
}

impl AdjustmentType {
    /// Lowercase label as stored
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Maintain => "maintain",
        }
    }

    /// Past-tense verb used in summaries
    #[must_use]
    pub const fn past_tense(&self) -> &'static str {
        match self {
            Self::Increase => "Increased",
            Self::Decrease => "Decreased",
            Self::Maintain => "Maintained",
        }
    }

    /// Whether this classification changes the exercise
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Maintain)
    }
}

impl fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovery milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// What should be achieved
    pub description: String,
    /// When it should be achieved
    pub target_date: DateTime<Utc>,
    /// Whether it has been achieved
    #[serde(default)]
    pub achieved: bool,
    /// When it was achieved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_date: Option<DateTime<Utc>>,
}

/// One entry of a plan's adjustment history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAdjustment {
    /// When the adjustment was persisted
    pub date: DateTime<Utc>,
    /// Exercise name at the time of the adjustment
    pub exercise_name: String,
    /// Classification derived from the prescription change
    pub adjustment_type: AdjustmentType,
    /// Human-readable reason
    pub reason: String,
    /// Sets before
    pub previous_sets: u32,
    /// Reps before
    pub previous_reps: u32,
    /// Sets after
    pub new_sets: u32,
    /// Reps after
    pub new_reps: u32,
}

impl ExerciseAdjustment {
    /// Build a history record by comparing the stored and new prescriptions
    ///
    /// A missing previous exercise counts as `0x0`. Any growth in sets or reps is an
    /// increase; otherwise any shrinkage is a decrease.
    #[must_use]
    pub fn between(previous: Option<&Exercise>, current: &Exercise, date: DateTime<Utc>) -> Self {
        let (previous_sets, previous_reps) = previous.map_or((0, 0), |p| (p.sets, p.reps));

        let adjustment_type = match (
            previous_sets.cmp(&current.sets),
            previous_reps.cmp(&current.reps),
        ) {
            (Ordering::Less, _) | (_, Ordering::Less) => AdjustmentType::Increase,
            (Ordering::Greater, _) | (_, Ordering::Greater) => AdjustmentType::Decrease,
            _ => AdjustmentType::Maintain,
        };

        Self {
            date,
            exercise_name: current.name.clone(),
            adjustment_type,
            reason: current
                .adjustment_reason
                .clone()
                .unwrap_or_else(|| DEFAULT_ADJUSTMENT_REASON.to_owned()),
            previous_sets,
            previous_reps,
            new_sets: current.sets,
            new_reps: current.reps,
        }
    }
}

/// The current exercise prescription for an injury
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryPlan {
    /// Store-assigned identifier
    pub id: String,
    /// Injury the plan belongs to
    pub injury_id: String,
    /// Prescribed exercises
    pub exercises: Vec<Exercise>,
    /// Expected recovery timeline
    #[serde(default)]
    pub timeline: String,
    /// Milestones to track
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// When the exercises were last adjusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_adjusted: Option<DateTime<Utc>>,
    /// Append-only adjustment history
    #[serde(default)]
    pub adjustment_history: Vec<ExerciseAdjustment>,
}

/// Client-supplied plan before the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecoveryPlan {
    /// Injury the plan belongs to
    pub injury_id: String,
    /// Prescribed exercises
    pub exercises: Vec<Exercise>,
    /// Expected recovery timeline
    #[serde(default)]
    pub timeline: String,
    /// Milestones to track
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_classifies_growth_as_increase() {
        let old = Exercise::new("Squat", 3, 10);
        let new = Exercise::new("Squat", 3, 12);
        let record = ExerciseAdjustment::between(Some(&old), &new, Utc::now());
        assert_eq!(record.adjustment_type, AdjustmentType::Increase);
        assert_eq!(record.reason, DEFAULT_ADJUSTMENT_REASON);
    }

    #[test]
    fn test_between_mixed_change_counts_as_increase() {
        // More sets at fewer reps is recorded as an increase
        let old = Exercise::new("Lunge", 3, 15);
        let new = Exercise::new("Lunge", 4, 12);
        let record = ExerciseAdjustment::between(Some(&old), &new, Utc::now());
        assert_eq!(record.adjustment_type, AdjustmentType::Increase);
    }

    #[test]
    fn test_between_missing_previous_is_zero() {
        let new = Exercise::new("Plank", 2, 5);
        let record = ExerciseAdjustment::between(None, &new, Utc::now());
        assert_eq!((record.previous_sets, record.previous_reps), (0, 0));
        assert_eq!(record.adjustment_type, AdjustmentType::Increase);
    }

    #[test]
    fn test_between_unchanged_is_maintain() {
        let old = Exercise::new("Plank", 2, 5);
        let record = ExerciseAdjustment::between(Some(&old), &old, Utc::now());
        assert_eq!(record.adjustment_type, AdjustmentType::Maintain);
    }

    #[test]
    fn test_adjustment_type_serializes_lowercase() {
        let json = serde_json::to_string(&AdjustmentType::Decrease).unwrap();
        assert_eq!(json, "\"decrease\"");
    }
}
