// ABOUTME: Configurable adjustment engine bundling thresholds with the four engine operations
// ABOUTME: Use when thresholds differ from the defaults; free functions cover the default case
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::models::{AdjustmentType, Exercise, ProgressEntry};

use crate::config::{AdjustmentEngineConfig, ConfigError};
use crate::decision::{decide_with, Decision};
use crate::intensity::estimate_with;
use crate::mutator::apply_with;
use crate::program::{generate_with, AdjustedProgram};

/// Exercise adjustment engine with explicit configuration
///
/// Holds no state besides its configuration, so one instance can be shared
/// across tasks and calls.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentEngine {
    config: AdjustmentEngineConfig,
}

impl AdjustmentEngine {
    /// Create an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: AdjustmentEngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AdjustmentEngineConfig {
        &self.config
    }

    /// Estimate intensity on the configured scale
    #[must_use]
    pub fn estimate_intensity(&self, exercise: &Exercise) -> u8 {
        estimate_with(exercise, &self.config.intensity)
    }

    /// Decide how to adjust an exercise
    #[must_use]
    pub fn determine_adjustment(
        &self,
        exercise: &Exercise,
        history: &[ProgressEntry],
    ) -> AdjustmentType {
        self.decide(exercise, history).adjustment
    }

    /// Decide how to adjust an exercise, reporting which rule fired
    #[must_use]
    pub fn decide(&self, exercise: &Exercise, history: &[ProgressEntry]) -> Decision {
        decide_with(exercise, history, &self.config)
    }

    /// Apply a decision to an exercise
    #[must_use]
    pub fn adjust_exercise(&self, exercise: &Exercise, adjustment: AdjustmentType) -> Exercise {
        apply_with(
            exercise,
            adjustment,
            &self.config.progression,
            &self.config.messages,
        )
    }

    /// Adjust every exercise in a plan
    #[must_use]
    pub fn generate_program(
        &self,
        exercises: &[Exercise],
        history: &[ProgressEntry],
    ) -> AdjustedProgram {
        generate_with(exercises, history, &self.config)
    }
}
