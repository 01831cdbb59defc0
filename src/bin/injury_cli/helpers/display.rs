// ABOUTME: Output formatting helpers for injury-cli
// ABOUTME: Prints injuries, plans, progress tables, alerts, and adjustment results to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_tracker::formatters::{format_date, join_or};
use injury_tracker::models::{
    Alert, BodyPart, Exercise, ExerciseAdjustment, Injury, ProgressEntry, RecoveryPlan,
};
use injury_tracker::services::SmartAdjustmentOutcome;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print every selectable body part
pub fn display_body_parts() {
    println!("{:<18} NAME", "ID");
    for part in BodyPart::ALL {
        println!("{:<18} {}", part.id(), part.display_name());
    }
}

/// Print one injury in full
pub fn display_injury(injury: &Injury) {
    println!("\n{}", rule());
    println!("{} ({})", injury.body_part, injury.sport);
    println!("{}", rule());
    println!("   ID: {}", injury.id);
    println!("   Status: {}", injury.status);
    println!("   Date: {}", format_date(&injury.date));
    println!("   Cause: {}", injury.cause);
    println!("   Symptoms: {}", join_or(&injury.symptoms, "None recorded"));
    if !injury.possible_injuries.is_empty() {
        println!("   Possible injuries: {}", injury.possible_injuries.join(", "));
    }
}

/// Print one line per injury
pub fn display_injury_list(injuries: &[Injury]) {
    if injuries.is_empty() {
        println!("No injuries reported yet.");
        return;
    }
    println!("{:<38} {:<16} {:<16} {:<14} REPORTED", "ID", "BODY PART", "SPORT", "STATUS");
    for injury in injuries {
        println!(
            "{:<38} {:<16} {:<16} {:<14} {}",
            injury.id,
            injury.body_part,
            injury.sport,
            injury.status.to_string(),
            format_date(&injury.created_at)
        );
    }
}

fn display_exercise(index: usize, exercise: &Exercise) {
    println!(
        "   {}. {} - {}x{}{}",
        index + 1,
        exercise.name,
        exercise.sets,
        exercise.reps,
        if exercise.frequency.is_empty() {
            String::new()
        } else {
            format!(", {}", exercise.frequency)
        }
    );
    if !exercise.description.is_empty() {
        println!("      {}", exercise.description);
    }
    if let Some(notes) = exercise.notes.as_deref().filter(|n| !n.is_empty()) {
        println!("      Notes: {notes}");
    }
}

/// Print a recovery plan with its exercises
pub fn display_plan(plan: &RecoveryPlan) {
    println!("\nRecovery Plan {}", plan.id);
    println!("{}", rule());
    println!("   Created: {}", format_date(&plan.created_at));
    if let Some(adjusted) = &plan.last_adjusted {
        println!("   Last adjusted: {}", format_date(adjusted));
    }
    if !plan.timeline.is_empty() {
        println!("   Timeline: {}", plan.timeline);
    }
    println!("\n   Exercises:");
    for (index, exercise) in plan.exercises.iter().enumerate() {
        display_exercise(index, exercise);
    }
    if !plan.milestones.is_empty() {
        println!("\n   Milestones:");
        for milestone in &plan.milestones {
            println!(
                "   [{}] {} (target {})",
                if milestone.achieved { "x" } else { " " },
                milestone.description,
                format_date(&milestone.target_date)
            );
        }
    }
}

/// Print progress entries as a table
pub fn display_progress(entries: &[ProgressEntry]) {
    if entries.is_empty() {
        println!("\nNo progress logged yet.");
        return;
    }
    println!("\n{:<20} {:>5} {:>9} {:>9}  NOTES", "DATE", "PAIN", "MOBILITY", "SWELLING");
    for entry in entries {
        println!(
            "{:<20} {:>5} {:>9} {:>9}  {}",
            format_date(&entry.date),
            entry.pain_level,
            entry.mobility,
            entry.swelling,
            entry.notes
        );
        for log in &entry.exercises {
            println!(
                "{:<20} - {} ({}, difficulty {})",
                "",
                log.exercise_id,
                if log.completed { "done" } else { "skipped" },
                log.difficulty
            );
        }
    }
}

/// Print alerts, newest first as given
pub fn display_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("\nNo alerts.");
        return;
    }
    println!("\nAlerts:");
    for alert in alerts {
        println!(
            "\n{} [{}] {} ({})",
            if alert.read { " " } else { "*" },
            alert.alert_type.as_str(),
            format_date(&alert.created_at),
            alert.id
        );
        for line in alert.message.lines() {
            println!("   {line}");
        }
        if let Some(action) = &alert.action {
            println!("   -> {action}");
        }
    }
}

/// Print the result of a smart adjustment run
pub fn display_adjustment_outcome(outcome: &SmartAdjustmentOutcome) {
    println!("\n{}", outcome.adjustment_summary);
    println!("{}", rule());
    for decision in &outcome.decisions {
        println!(
            "   {:<28} {:<9} {}x{} -> {}x{}  ({})",
            decision.name,
            decision.adjustment.as_str(),
            decision.previous_sets,
            decision.previous_reps,
            decision.new_sets,
            decision.new_reps,
            decision.rule.describe()
        );
    }
    println!("\nAdjusted on {}", format_date(&outcome.last_adjusted));
}

/// Print the adjustment history of a plan
pub fn display_adjustment_history(history: &[ExerciseAdjustment]) {
    if history.is_empty() {
        println!("This plan has not been adjusted yet.");
        return;
    }
    for record in history {
        println!(
            "{:<20} {:<28} {:<9} {}x{} -> {}x{}  {}",
            format_date(&record.date),
            record.exercise_name,
            record.adjustment_type.as_str(),
            record.previous_sets,
            record.previous_reps,
            record.new_sets,
            record.new_reps,
            record.reason
        );
    }
}

/// Print LLM output between rules with the medical disclaimer
pub fn display_analysis(title: &str, text: &str) {
    println!("\n{title}");
    println!("{}", rule());
    println!("{text}");
    println!("{}", rule());
    println!("This is not a diagnosis. Please consult a medical professional.");
}
