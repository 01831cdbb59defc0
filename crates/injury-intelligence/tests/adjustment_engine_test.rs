// ABOUTME: Integration tests for the exercise adjustment engine public API
// ABOUTME: Covers intensity scoring, the decision table, mutation arithmetic, and summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use injury_core::models::{AdjustmentType, CompletedExercise, Exercise, ProgressEntry};
use injury_intelligence::{
    adjust_exercise, determine_adjustment, estimate_intensity, generate_smart_program,
    AdjustmentEngine, AdjustmentEngineConfig, DecisionRule,
};

fn at(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 18, 30, 0).unwrap() + Duration::days(day)
}

fn progress(day: i64, pain: u8, mobility: u8) -> ProgressEntry {
    ProgressEntry {
        id: format!("entry-{day}"),
        user_id: "user-1".to_owned(),
        injury_id: "injury-1".to_owned(),
        date: at(day),
        pain_level: pain,
        mobility,
        swelling: 4,
        notes: String::new(),
        exercises: Vec::new(),
    }
}

fn with_log(mut entry: ProgressEntry, exercise_id: &str, difficulty: u8) -> ProgressEntry {
    entry
        .exercises
        .push(CompletedExercise::new(exercise_id, true, difficulty));
    entry
}

// ============================================================================
// Intensity
// ============================================================================

#[test]
fn test_intensity_examples() {
    assert_eq!(estimate_intensity(&Exercise::new("Lunge", 4, 10)), 4);
    assert_eq!(estimate_intensity(&Exercise::new("Lunge", 2, 8)), 2);
    assert_eq!(estimate_intensity(&Exercise::new("Lunge", 3, 10)), 3);
    assert_eq!(estimate_intensity(&Exercise::new("Lunge", 6, 25)), 4);
}

// ============================================================================
// Decisions
// ============================================================================

#[test]
fn test_empty_history_maintains() {
    let exercise = Exercise::new("Lunge", 3, 10);
    assert_eq!(
        determine_adjustment(&exercise, &[]),
        AdjustmentType::Maintain
    );
}

#[test]
fn test_single_high_pain_entry_maintains() {
    let exercise = Exercise::new("Lunge", 3, 10);
    assert_eq!(
        determine_adjustment(&exercise, &[progress(0, 9, 1)]),
        AdjustmentType::Maintain
    );
}

#[test]
fn test_pain_escalation_decreases_regardless_of_mobility() {
    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![progress(0, 4, 2), progress(1, 8, 10)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Decrease
    );
}

#[test]
fn test_high_but_stable_pain_does_not_escalate() {
    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![progress(0, 8, 5), progress(1, 8, 5)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Maintain
    );
}

#[test]
fn test_mobility_improvement_increases() {
    let exercise = Exercise::new("Lunge", 3, 10);
    assert_eq!(estimate_intensity(&exercise), 3);
    let history = vec![progress(0, 3, 4), progress(1, 3, 7)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Increase
    );
}

#[test]
fn test_mobility_improvement_blocked_by_pain_five() {
    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![progress(0, 5, 4), progress(1, 5, 7)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Maintain
    );
}

#[test]
fn test_easy_log_increases_and_hard_log_decreases() {
    let exercise = Exercise::new("Lunge", 3, 10);

    let easy = vec![progress(0, 4, 5), with_log(progress(1, 4, 5), "Lunge", 3)];
    assert_eq!(
        determine_adjustment(&exercise, &easy),
        AdjustmentType::Increase
    );

    let hard = vec![progress(0, 4, 5), with_log(progress(1, 4, 5), "Lunge", 8)];
    assert_eq!(
        determine_adjustment(&exercise, &hard),
        AdjustmentType::Decrease
    );
}

#[test]
fn test_only_latest_entry_log_counts() {
    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![with_log(progress(0, 4, 5), "Lunge", 10), progress(1, 4, 5)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Maintain
    );
}

#[test]
fn test_log_correlation_is_case_sensitive() {
    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![progress(0, 4, 5), with_log(progress(1, 4, 5), "lunge", 9)];
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Maintain
    );
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_increase_and_decrease_examples() {
    let base = Exercise::new("Lunge", 3, 10);

    let increased = adjust_exercise(&base, AdjustmentType::Increase);
    assert_eq!((increased.sets, increased.reps), (3, 12));

    let graduated = adjust_exercise(&Exercise::new("Lunge", 3, 15), AdjustmentType::Increase);
    assert_eq!((graduated.sets, graduated.reps), (4, 12));

    let decreased = adjust_exercise(&base, AdjustmentType::Decrease);
    assert_eq!((decreased.sets, decreased.reps), (2, 8));

    // Input untouched
    assert_eq!((base.sets, base.reps), (3, 10));
    assert!(base.notes.is_none());
}

#[test]
fn test_mutator_leaves_reason_and_intensity_alone() {
    let mut base = Exercise::new("Lunge", 3, 10);
    base.intensity = Some(3);
    base.adjustment_reason = Some("initial".to_owned());
    let increased = adjust_exercise(&base, AdjustmentType::Increase);
    assert_eq!(increased.intensity, Some(3));
    assert_eq!(increased.adjustment_reason.as_deref(), Some("initial"));
}

// ============================================================================
// Program generation
// ============================================================================

#[test]
fn test_program_mixes_decisions_in_input_order() {
    let plan = vec![
        Exercise::new("Heel raise", 3, 10).with_id("ex-heel"),
        Exercise::new("Step down", 3, 10).with_id("ex-step"),
        Exercise::new("Balance", 2, 8).with_id("ex-balance"),
    ];
    let latest = progress(1, 4, 5);
    let latest = with_log(latest, "ex-heel", 2);
    let latest = with_log(latest, "ex-step", 9);
    let history = vec![latest, progress(0, 4, 5)];

    let program = generate_smart_program(&plan, &history);

    let names: Vec<&str> = program.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Heel raise", "Step down", "Balance"]);
    assert_eq!(
        program
            .decisions
            .iter()
            .map(|d| d.adjustment)
            .collect::<Vec<_>>(),
        [
            AdjustmentType::Increase,
            AdjustmentType::Decrease,
            AdjustmentType::Maintain
        ]
    );
    assert_eq!(program.decisions[0].rule, DecisionRule::ReportedEasy);
    assert_eq!(program.decisions[1].rule, DecisionRule::ReportedHard);
    assert_eq!(program.exercises[2], plan[2]);
    assert_eq!(
        program.adjustment_summary,
        "Your exercise plan has been adjusted based on your recent progress:\n\
         • Heel raise: Increased intensity (3x10 → 3x12)\n\
         • Step down: Decreased intensity (3x10 → 2x8)"
    );
}

#[test]
fn test_all_maintain_summary_is_exact() {
    let plan = vec![Exercise::new("Lunge", 3, 10), Exercise::new("Plank", 3, 1)];
    let history = vec![progress(0, 4, 5), progress(1, 4, 5)];
    let program = generate_smart_program(&plan, &history);
    assert_eq!(
        program.adjustment_summary,
        "Your exercise plan remains the same as your progress is on track."
    );
    assert_eq!(program.exercises, plan);
}

#[test]
fn test_engine_with_tuned_thresholds() {
    let mut config = AdjustmentEngineConfig::default();
    config.decision.pain_escalation_level = 6;
    let engine = AdjustmentEngine::with_config(config).unwrap();

    let exercise = Exercise::new("Lunge", 3, 10);
    let history = vec![progress(0, 4, 5), progress(1, 6, 5)];
    assert_eq!(
        engine.determine_adjustment(&exercise, &history),
        AdjustmentType::Decrease
    );
    assert_eq!(
        determine_adjustment(&exercise, &history),
        AdjustmentType::Maintain
    );
}
