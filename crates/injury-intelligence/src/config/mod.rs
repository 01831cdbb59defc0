// ABOUTME: Adjustment engine configuration: thresholds, progression rules, and messages
// ABOUTME: Defaults reproduce the fixed rule table; env overrides allow clinical tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Adjustment Engine Configuration
//!
//! Provides the thresholds the engine compares against, the arithmetic used to
//! grow or shrink a prescription, and the fixed text it writes into notes and
//! summaries. `AdjustmentEngineConfig::default()` is the canonical rule table.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use injury_core::constants::scales::{MAX_INTENSITY, MAX_SCORE, MIN_INTENSITY, MIN_SCORE};

/// Canonical defaults shared by the free-function API
static DEFAULT_CONFIG: OnceLock<AdjustmentEngineConfig> = OnceLock::new();

/// Environment variable overriding the pain level that forces a decrease
const PAIN_ESCALATION_ENV: &str = "INJURY_PAIN_ESCALATION_LEVEL";
/// Environment variable overriding the pain ceiling for mobility-driven increases
const INCREASE_PAIN_CEILING_ENV: &str = "INJURY_INCREASE_PAIN_CEILING";
/// Environment variable overriding the "very hard" completion difficulty
const HARD_DIFFICULTY_ENV: &str = "INJURY_HARD_DIFFICULTY";

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentEngineConfig {
    /// Intensity estimation thresholds
    pub intensity: IntensityThresholds,
    /// Trend decision thresholds
    pub decision: DecisionThresholds,
    /// Prescription arithmetic
    pub progression: ProgressionRules,
    /// Note and summary text
    pub messages: AdjustmentMessages,
}

/// Thresholds for the 1-5 intensity estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityThresholds {
    /// Starting score before adjustments
    pub baseline: u8,
    /// Sets at or above this raise intensity
    pub high_sets: u32,
    /// Reps at or above this raise intensity
    pub high_reps: u32,
    /// Sets at or below this (together with `low_reps`) lower intensity
    pub low_sets: u32,
    /// Reps at or below this (together with `low_sets`) lower intensity
    pub low_reps: u32,
    /// Lowest score
    pub min: u8,
    /// Highest score
    pub max: u8,
}

/// Thresholds for the increase/decrease/maintain decision
///
/// Comparisons named `*_ceiling` are strict (`<`); all others are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Fewer entries than this always maintain
    pub min_history: usize,
    /// Rising pain at or above this level forces a decrease
    pub pain_escalation_level: u8,
    /// Mobility-driven increases need latest pain below this
    pub increase_pain_ceiling: u8,
    /// Mobility-driven increases need intensity below this
    pub increase_intensity_ceiling: u8,
    /// Completion difficulty at or below this counts as easy
    pub easy_difficulty: u8,
    /// Easy-driven increases need latest pain below this
    pub easy_pain_ceiling: u8,
    /// Completion difficulty at or above this counts as very hard
    pub hard_difficulty: u8,
}

/// Arithmetic for growing and shrinking a prescription
///
/// Percentages are applied with integer floor division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRules {
    /// Rep growth on increase, in percent
    pub increase_reps_percent: u32,
    /// Upper bound on reps after a plain rep increase
    pub max_reps: u32,
    /// Original reps at or above this graduate to an extra set instead
    pub set_progression_reps: u32,
    /// Upper bound on sets after graduation
    pub max_sets: u32,
    /// Rep reset on graduation, in percent of the original reps
    pub set_progression_reps_percent: u32,
    /// Lower bound on reps after graduation
    pub set_progression_min_reps: u32,
    /// Rep shrinkage on decrease, in percent
    pub decrease_reps_percent: u32,
    /// Lower bound on reps after a decrease
    pub min_reps: u32,
    /// Lower bound on sets after a decrease
    pub min_sets: u32,
}

/// Fixed text written by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentMessages {
    /// Appended to notes on increase
    pub increase_note: String,
    /// Appended to notes on decrease
    pub decrease_note: String,
    /// First line of a summary listing changes
    pub summary_header: String,
    /// Whole summary when nothing changed
    pub unchanged_summary: String,
}

impl Default for IntensityThresholds {
    fn default() -> Self {
        Self {
            baseline: 3,
            high_sets: 4,
            high_reps: 15,
            low_sets: 2,
            low_reps: 8,
            min: MIN_INTENSITY,
            max: MAX_INTENSITY,
        }
    }
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            min_history: 2,
            pain_escalation_level: 7,
            increase_pain_ceiling: 5,
            increase_intensity_ceiling: 5,
            easy_difficulty: 3,
            easy_pain_ceiling: 6,
            hard_difficulty: 8,
        }
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            increase_reps_percent: 120,
            max_reps: 20,
            set_progression_reps: 15,
            max_sets: 5,
            set_progression_reps_percent: 80,
            set_progression_min_reps: 8,
            decrease_reps_percent: 80,
            min_reps: 5,
            min_sets: 1,
        }
    }
}

impl Default for AdjustmentMessages {
    fn default() -> Self {
        Self {
            increase_note: "Increased intensity due to good progress.".to_owned(),
            decrease_note: "Decreased intensity to manage pain/difficulty.".to_owned(),
            summary_header: "Your exercise plan has been adjusted based on your recent progress:"
                .to_owned(),
            unchanged_summary: "Your exercise plan remains the same as your progress is on track."
                .to_owned(),
        }
    }
}

impl AdjustmentEngineConfig {
    /// Shared canonical defaults
    #[must_use]
    pub fn defaults() -> &'static Self {
        DEFAULT_CONFIG.get_or_init(Self::default)
    }

    /// Defaults with environment overrides applied, then validated
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the result is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(level) = env_override::<u8>(PAIN_ESCALATION_ENV)? {
            config.decision.pain_escalation_level = level;
        }
        if let Some(ceiling) = env_override::<u8>(INCREASE_PAIN_CEILING_ENV)? {
            config.decision.increase_pain_ceiling = ceiling;
        }
        if let Some(difficulty) = env_override::<u8>(HARD_DIFFICULTY_ENV)? {
            config.decision.hard_difficulty = difficulty;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intensity = &self.intensity;
        if intensity.min == 0 || intensity.min > intensity.max {
            return Err(ConfigError::InvalidRange(
                "intensity min must be >= 1 and <= max",
            ));
        }
        if !(intensity.min..=intensity.max).contains(&intensity.baseline) {
            return Err(ConfigError::ValueOutOfRange(
                "intensity baseline must lie within min..=max",
            ));
        }
        if intensity.low_sets >= intensity.high_sets || intensity.low_reps >= intensity.high_reps {
            return Err(ConfigError::InvalidRange(
                "low intensity thresholds must be below high thresholds",
            ));
        }

        let decision = &self.decision;
        for score in [
            decision.pain_escalation_level,
            decision.increase_pain_ceiling,
            decision.easy_difficulty,
            decision.easy_pain_ceiling,
            decision.hard_difficulty,
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(ConfigError::ValueOutOfRange(
                    "decision thresholds must lie on the 1-10 scale",
                ));
            }
        }
        if decision.easy_difficulty >= decision.hard_difficulty {
            return Err(ConfigError::InvalidRange(
                "easy_difficulty must be < hard_difficulty",
            ));
        }
        if decision.min_history < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_history must be at least 2 to form a trend",
            ));
        }

        let progression = &self.progression;
        if progression.min_sets == 0 || progression.min_reps == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_sets and min_reps must be at least 1",
            ));
        }
        if progression.min_reps > progression.max_reps || progression.min_sets > progression.max_sets
        {
            return Err(ConfigError::InvalidRange(
                "progression minimums must not exceed maximums",
            ));
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("{name}={raw} is not a valid value"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AdjustmentEngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_difficulty_thresholds_rejected() {
        let mut config = AdjustmentEngineConfig::default();
        config.decision.easy_difficulty = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_zero_min_reps_rejected() {
        let mut config = AdjustmentEngineConfig::default();
        config.progression.min_reps = 0;
        assert!(config.validate().is_err());
    }
}
