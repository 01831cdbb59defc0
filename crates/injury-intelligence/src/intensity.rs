// ABOUTME: Intensity estimation for prescribed exercises on a 1-5 scale
// ABOUTME: Derives a difficulty estimate from sets and reps alone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::models::Exercise;

use crate::config::{AdjustmentEngineConfig, IntensityThresholds};

/// Estimate an exercise's intensity using the default thresholds
///
/// High volume (`sets >= 4` or `reps >= 15`) raises the baseline of 3 by one;
/// low volume (`sets <= 2` and `reps <= 8`) lowers it by one. The result is
/// always within `1..=5`.
#[must_use]
pub fn estimate_intensity(exercise: &Exercise) -> u8 {
    estimate_with(exercise, &AdjustmentEngineConfig::defaults().intensity)
}

pub(crate) fn estimate_with(exercise: &Exercise, thresholds: &IntensityThresholds) -> u8 {
    let mut score = thresholds.baseline;

    if exercise.sets >= thresholds.high_sets || exercise.reps >= thresholds.high_reps {
        score = score.saturating_add(1);
    }
    if exercise.sets <= thresholds.low_sets && exercise.reps <= thresholds.low_reps {
        score = score.saturating_sub(1);
    }

    score.clamp(thresholds.min, thresholds.max)
}
