// ABOUTME: Increase/decrease/maintain decisions from recent progress trends
// ABOUTME: Evaluates a fixed-priority rule table against the two most recent entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Adjustment decisions
//!
//! The history may arrive in any order. It is sorted newest first with a
//! stable sort, so entries sharing a timestamp keep the caller's relative
//! order. Rules are evaluated in priority order and the first match wins:
//!
//! 1. Pain rose and reached the escalation level: decrease
//! 2. Mobility improved while pain and intensity are moderate: increase
//! 3. The exercise was logged as easy and pain is moderate: increase
//! 4. The exercise was logged as very hard: decrease
//! 5. Otherwise: maintain

use std::fmt;

use serde::{Deserialize, Serialize};

use injury_core::models::{AdjustmentType, Exercise, ProgressEntry};

use crate::config::{AdjustmentEngineConfig, DecisionThresholds};
use crate::intensity::estimate_with;

/// Rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Fewer entries than needed to see a trend
    InsufficientHistory,
    /// Pain rose to or above the escalation level
    PainEscalation,
    /// Mobility improved with low pain and headroom in intensity
    MobilityImproved,
    /// Latest completion log rated the exercise easy
    ReportedEasy,
    /// Latest completion log rated the exercise very hard
    ReportedHard,
    /// No rule matched
    NoSignal,
}

impl DecisionRule {
    /// Short human-readable explanation
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::InsufficientHistory => "not enough progress entries to detect a trend",
            Self::PainEscalation => "pain increased to a high level",
            Self::MobilityImproved => "mobility improved while pain stayed low",
            Self::ReportedEasy => "exercise was reported as easy",
            Self::ReportedHard => "exercise was reported as very hard",
            Self::NoSignal => "progress is on track",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An adjustment together with the rule that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// What to do with the exercise
    pub adjustment: AdjustmentType,
    /// Why
    pub rule: DecisionRule,
}

impl Decision {
    const fn new(adjustment: AdjustmentType, rule: DecisionRule) -> Self {
        Self { adjustment, rule }
    }
}

/// Decide how to adjust an exercise using the default thresholds
#[must_use]
pub fn determine_adjustment(exercise: &Exercise, history: &[ProgressEntry]) -> AdjustmentType {
    decide_with(exercise, history, AdjustmentEngineConfig::defaults()).adjustment
}

pub(crate) fn decide_with(
    exercise: &Exercise,
    history: &[ProgressEntry],
    config: &AdjustmentEngineConfig,
) -> Decision {
    let thresholds = &config.decision;
    if history.len() < thresholds.min_history {
        return Decision::new(AdjustmentType::Maintain, DecisionRule::InsufficientHistory);
    }

    let mut ordered: Vec<&ProgressEntry> = history.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    let (latest, previous) = match ordered.as_slice() {
        [latest, previous, ..] => (*latest, *previous),
        _ => return Decision::new(AdjustmentType::Maintain, DecisionRule::InsufficientHistory),
    };

    let intensity = estimate_with(exercise, &config.intensity);
    evaluate_rules(exercise, latest, previous, intensity, thresholds)
}

fn evaluate_rules(
    exercise: &Exercise,
    latest: &ProgressEntry,
    previous: &ProgressEntry,
    intensity: u8,
    thresholds: &DecisionThresholds,
) -> Decision {
    if latest.pain_level > previous.pain_level
        && latest.pain_level >= thresholds.pain_escalation_level
    {
        return Decision::new(AdjustmentType::Decrease, DecisionRule::PainEscalation);
    }

    if latest.mobility > previous.mobility
        && latest.pain_level < thresholds.increase_pain_ceiling
        && intensity < thresholds.increase_intensity_ceiling
    {
        return Decision::new(AdjustmentType::Increase, DecisionRule::MobilityImproved);
    }

    if let Some(log) = latest.completed_exercise(exercise.correlation_key()) {
        if log.difficulty <= thresholds.easy_difficulty
            && latest.pain_level < thresholds.easy_pain_ceiling
        {
            return Decision::new(AdjustmentType::Increase, DecisionRule::ReportedEasy);
        }
        if log.difficulty >= thresholds.hard_difficulty {
            return Decision::new(AdjustmentType::Decrease, DecisionRule::ReportedHard);
        }
    }

    Decision::new(AdjustmentType::Maintain, DecisionRule::NoSignal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use injury_core::models::CompletedExercise;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn entry(days: i64, pain: u8, mobility: u8) -> ProgressEntry {
        ProgressEntry {
            id: format!("p{days}"),
            user_id: "u1".to_owned(),
            injury_id: "i1".to_owned(),
            date: day(days),
            pain_level: pain,
            mobility,
            swelling: 3,
            notes: String::new(),
            exercises: Vec::new(),
        }
    }

    fn logged(mut entry: ProgressEntry, key: &str, difficulty: u8) -> ProgressEntry {
        entry
            .exercises
            .push(CompletedExercise::new(key, true, difficulty));
        entry
    }

    #[test]
    fn test_single_entry_maintains_even_with_high_pain() {
        let exercise = Exercise::new("Bridge", 3, 10);
        let decision = decide_with(
            &exercise,
            &[entry(0, 9, 2)],
            AdjustmentEngineConfig::defaults(),
        );
        assert_eq!(decision.adjustment, AdjustmentType::Maintain);
        assert_eq!(decision.rule, DecisionRule::InsufficientHistory);
    }

    #[test]
    fn test_pain_escalation_beats_easy_log() {
        let exercise = Exercise::new("Bridge", 3, 10);
        let history = vec![entry(0, 4, 4), logged(entry(1, 8, 9), "Bridge", 1)];
        let decision = decide_with(&exercise, &history, AdjustmentEngineConfig::defaults());
        assert_eq!(decision.rule, DecisionRule::PainEscalation);
    }

    #[test]
    fn test_unsorted_history_uses_newest_pair() {
        let exercise = Exercise::new("Bridge", 3, 10);
        // Oldest entry last; the trend 4 -> 7 mobility must still be seen
        let history = vec![entry(5, 3, 7), entry(2, 3, 4), entry(-10, 9, 9)];
        assert_eq!(
            determine_adjustment(&exercise, &history),
            AdjustmentType::Increase
        );
    }

    #[test]
    fn test_easy_log_requires_pain_below_six() {
        let exercise = Exercise::new("Bridge", 3, 10);
        let history = vec![entry(0, 6, 5), logged(entry(1, 6, 5), "Bridge", 2)];
        assert_eq!(
            determine_adjustment(&exercise, &history),
            AdjustmentType::Maintain
        );
    }

    #[test]
    fn test_log_matches_stable_id_before_name() {
        let exercise = Exercise::new("Bridge", 3, 10).with_id("ex-1");
        let by_name = vec![entry(0, 3, 5), logged(entry(1, 3, 5), "Bridge", 9)];
        assert_eq!(
            determine_adjustment(&exercise, &by_name),
            AdjustmentType::Maintain
        );

        let by_id = vec![entry(0, 3, 5), logged(entry(1, 3, 5), "ex-1", 9)];
        assert_eq!(
            determine_adjustment(&exercise, &by_id),
            AdjustmentType::Decrease
        );
    }

    #[test]
    fn test_equal_timestamps_keep_caller_order() {
        let exercise = Exercise::new("Bridge", 3, 10);
        let mut first = entry(1, 8, 5);
        let second = entry(1, 2, 5);
        first.id = "first".to_owned();
        // Stable sort keeps `first` ahead, so it is "latest" and pain rose 2 -> 8
        let history = vec![first, second];
        assert_eq!(
            determine_adjustment(&exercise, &history),
            AdjustmentType::Decrease
        );
    }
}
