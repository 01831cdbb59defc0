// ABOUTME: Progress entry models for dated pain, mobility, and swelling self-reports
// ABOUTME: Includes per-exercise completion logs and client-side range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::scales::{MAX_SCORE, MIN_SCORE};
use crate::errors::{AppError, AppResult};

/// One logged completion of a prescribed exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    /// Correlation key of the exercise (its stable id, or its name for legacy logs)
    pub exercise_id: String,
    /// Whether the prescribed work was completed
    pub completed: bool,
    /// Perceived difficulty, 1-10
    pub difficulty: u8,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Pain during the exercise, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_during: Option<u8>,
    /// Pain after the exercise, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_after: Option<u8>,
    /// Modifications the user made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<String>,
}

impl CompletedExercise {
    /// Create a completion log for the given exercise key
    #[must_use]
    pub fn new(exercise_id: impl Into<String>, completed: bool, difficulty: u8) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            completed,
            difficulty,
            notes: None,
            pain_during: None,
            pain_after: None,
            modifications: None,
        }
    }
}

/// One dated observation for an injury
///
/// Entries are immutable once stored; `id` and `date` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Store-assigned identifier
    pub id: String,
    /// Owner of the entry
    pub user_id: String,
    /// Injury this entry belongs to
    pub injury_id: String,
    /// Creation timestamp assigned by the store
    pub date: DateTime<Utc>,
    /// Pain level, 1-10
    pub pain_level: u8,
    /// Mobility, 1-10
    pub mobility: u8,
    /// Swelling, 1-10
    pub swelling: u8,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Per-exercise completion logs
    #[serde(default)]
    pub exercises: Vec<CompletedExercise>,
}

impl ProgressEntry {
    /// Find the completion log for an exercise key (exact match)
    #[must_use]
    pub fn completed_exercise(&self, key: &str) -> Option<&CompletedExercise> {
        self.exercises.iter().find(|log| log.exercise_id == key)
    }
}

/// Client-supplied progress report, before the store assigns id and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressEntry {
    /// Owner of the entry
    pub user_id: String,
    /// Injury this entry belongs to
    pub injury_id: String,
    /// Pain level, 1-10
    pub pain_level: u8,
    /// Mobility, 1-10
    pub mobility: u8,
    /// Swelling, 1-10
    pub swelling: u8,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Per-exercise completion logs
    #[serde(default)]
    pub exercises: Vec<CompletedExercise>,
}

impl NewProgressEntry {
    /// Check every score against the 1-10 scale
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field.
    pub fn validate(&self) -> AppResult<()> {
        check_score("painLevel", self.pain_level)?;
        check_score("mobility", self.mobility)?;
        check_score("swelling", self.swelling)?;
        for log in &self.exercises {
            if log.exercise_id.trim().is_empty() {
                return Err(AppError::missing_field("exerciseId"));
            }
            check_score("difficulty", log.difficulty)?;
            if let Some(pain) = log.pain_during {
                check_score("painDuring", pain)?;
            }
            if let Some(pain) = log.pain_after {
                check_score("painAfter", pain)?;
            }
        }
        Ok(())
    }

    /// Materialize the stored entry
    #[must_use]
    pub fn into_entry(self, id: String, date: DateTime<Utc>) -> ProgressEntry {
        ProgressEntry {
            id,
            user_id: self.user_id,
            injury_id: self.injury_id,
            date,
            pain_level: self.pain_level,
            mobility: self.mobility,
            swelling: self.swelling,
            notes: self.notes,
            exercises: self.exercises,
        }
    }
}

fn check_score(field: &str, value: u8) -> AppResult<()> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            field,
            i64::from(value),
            i64::from(MIN_SCORE),
            i64::from(MAX_SCORE),
        ))
    }
}
