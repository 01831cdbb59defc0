// ABOUTME: Prescribed exercise model forming part of a recovery plan
// ABOUTME: Carries sets/reps/frequency plus optional intensity, difficulty, and adjustment notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use serde::{Deserialize, Serialize};

use crate::constants::scales::{MAX_INTENSITY, MAX_SCORE, MIN_INTENSITY, MIN_SCORE};
use crate::errors::{AppError, AppResult};

/// A prescribed movement with sets, reps, and frequency
///
/// Serialized in camelCase so documents written by other clients of the
/// same store (`adjustmentReason`, `targetArea`) round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Stable key used to correlate completion logs; falls back to `name` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the exercise
    pub name: String,
    /// How to perform the movement
    #[serde(default)]
    pub description: String,
    /// Number of sets (at least 1)
    pub sets: u32,
    /// Repetitions per set (at least 1)
    pub reps: u32,
    /// Free-text frequency, e.g. "Daily" or "3x per week"
    #[serde(default)]
    pub frequency: String,
    /// Free-text notes, including adjustment annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Derived intensity on a 1-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    /// User-reported difficulty on a 1-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    /// Conditions under which the exercise should be avoided
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contraindications: Vec<String>,
    /// Equipment needed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    /// Body area the exercise targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_area: Option<String>,
    /// Why the exercise was last adjusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
}

impl Exercise {
    /// Create an exercise with the required prescription fields
    #[must_use]
    pub fn new(name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            sets,
            reps,
            frequency: String::new(),
            notes: None,
            intensity: None,
            difficulty: None,
            contraindications: Vec::new(),
            equipment: Vec::new(),
            target_area: None,
            adjustment_reason: None,
        }
    }

    /// Set a stable correlation key
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the frequency
    #[must_use]
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    /// Set the notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Key that completion logs use to refer to this exercise
    ///
    /// The stable `id` wins when present; otherwise the display name is the key.
    #[must_use]
    pub fn correlation_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Validate a prescription before it is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, sets/reps are zero, or the
    /// optional scores fall outside their scales.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("Exercise name"));
        }
        if self.sets == 0 {
            return Err(AppError::out_of_range("sets", 0, 1, i64::from(u32::MAX)));
        }
        if self.reps == 0 {
            return Err(AppError::out_of_range("reps", 0, 1, i64::from(u32::MAX)));
        }
        if let Some(intensity) = self.intensity {
            if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
                return Err(AppError::out_of_range(
                    "intensity",
                    i64::from(intensity),
                    i64::from(MIN_INTENSITY),
                    i64::from(MAX_INTENSITY),
                ));
            }
        }
        if let Some(difficulty) = self.difficulty {
            if !(MIN_SCORE..=MAX_SCORE).contains(&difficulty) {
                return Err(AppError::out_of_range(
                    "difficulty",
                    i64::from(difficulty),
                    i64::from(MIN_SCORE),
                    i64::from(MAX_SCORE),
                ));
            }
        }
        Ok(())
    }
}
