// ABOUTME: Prompt construction for injury analysis, recovery plans, and progress reviews
// ABOUTME: System prompts are loaded at compile time; user prompts are built from injury data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # Prompts
//!
//! System prompts live in markdown files next to this module so they can be
//! edited without touching code. The builders return the full message list
//! for a single-turn chat completion.

use std::fmt::Write;

use injury_core::formatters::{format_date, join_or};
use injury_core::models::{InjuryDetails, InjuryStatus, ProgressEntry};

use super::ChatMessage;

/// Fallback for optional fields that were left blank
const NOT_SPECIFIED: &str = "Not specified";

/// System prompt for the initial injury analysis
pub const INJURY_ANALYSIS_SYSTEM_PROMPT: &str = include_str!("injury_analysis_system.md");

/// System prompt for recovery plan generation
pub const RECOVERY_PLAN_SYSTEM_PROMPT: &str = include_str!("recovery_plan_system.md");

/// System prompt for progress trend analysis
pub const PROGRESS_ANALYSIS_SYSTEM_PROMPT: &str = include_str!("progress_analysis_system.md");

/// Messages asking for possible injuries, first steps, and red flags
#[must_use]
pub fn injury_analysis_messages(details: &InjuryDetails) -> Vec<ChatMessage> {
    let prompt = format!(
        "Analyze this injury:\n\
         Body Part: {}\n\
         Cause: {}\n\
         Date: {}\n\
         Sport: {}\n\
         Symptoms: {}\n\
         \n\
         Please provide:\n\
         1. Possible injuries (not as diagnosis)\n\
         2. Initial recovery recommendations\n\
         3. Warning signs that would require immediate medical attention",
        details.body_part,
        details.cause,
        format_date(&details.date),
        details.sport,
        details.symptoms.join(", "),
    );

    vec![
        ChatMessage::system(INJURY_ANALYSIS_SYSTEM_PROMPT.trim_end()),
        ChatMessage::user(prompt),
    ]
}

/// Messages asking for a structured recovery plan
///
/// `additional_info` is free text from the user (training schedule, goals,
/// previous treatment) and is passed through verbatim.
#[must_use]
pub fn recovery_plan_messages(
    details: &InjuryDetails,
    status: InjuryStatus,
    additional_info: &str,
) -> Vec<ChatMessage> {
    let prompt = format!(
        "Create a recovery plan for:\n\
         Body Part: {}\n\
         Cause: {}\n\
         Date of Injury: {}\n\
         Sport: {}\n\
         Symptoms: {}\n\
         Severity: {}\n\
         Status: {status}\n\
         \n\
         Additional Information:\n\
         {}\n\
         \n\
         Include:\n\
         1. Daily exercises and stretches\n\
         2. Recovery timeline expectations\n\
         3. Milestones to track\n\
         4. Prevention tips for future\n\
         5. Importance of sleep and rest",
        details.body_part,
        details.cause,
        format_date(&details.date),
        details.sport,
        join_or(&details.symptoms, NOT_SPECIFIED),
        details.severity.as_deref().unwrap_or(NOT_SPECIFIED),
        additional_info.trim(),
    );

    vec![
        ChatMessage::system(RECOVERY_PLAN_SYSTEM_PROMPT.trim_end()),
        ChatMessage::user(prompt),
    ]
}

/// Messages asking for a review of the recovery trajectory
///
/// Entries are listed in the order given; callers pass them oldest first.
#[must_use]
pub fn progress_analysis_messages(
    details: &InjuryDetails,
    entries: &[ProgressEntry],
) -> Vec<ChatMessage> {
    let pain_levels: Vec<String> = entries.iter().map(|e| e.pain_level.to_string()).collect();
    let dates: Vec<String> = entries.iter().map(|e| format_date(&e.date)).collect();
    let notes: Vec<String> = entries.iter().map(|e| e.notes.clone()).collect();

    let mut prompt = String::from("Analyze this recovery progress:\nOriginal Injury:\n");
    // Writing to a String cannot fail
    let _ = writeln!(prompt, "- Body Part: {}", details.body_part);
    let _ = writeln!(prompt, "- Cause: {}", details.cause);
    let _ = writeln!(prompt, "- Date: {}", format_date(&details.date));
    let _ = writeln!(prompt, "- Sport: {}", details.sport);
    let _ = writeln!(prompt, "- Symptoms: {}", details.symptoms.join(", "));
    prompt.push('\n');
    let _ = writeln!(prompt, "Pain Levels: {}", pain_levels.join(", "));
    let _ = writeln!(prompt, "Dates: {}", dates.join(", "));
    let _ = writeln!(prompt, "Notes: {}", notes.join(", "));
    prompt.push_str(
        "\nPlease provide:\n\
         1. Analysis of recovery trajectory\n\
         2. Recommendations for adjustment if needed\n\
         3. Warning signs to watch for\n\
         4. Suggested next steps",
    );

    vec![
        ChatMessage::system(PROGRESS_ANALYSIS_SYSTEM_PROMPT.trim_end()),
        ChatMessage::user(prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;
    use chrono::{TimeZone, Utc};

    fn ankle() -> InjuryDetails {
        InjuryDetails {
            body_part: "Left Ankle".to_owned(),
            cause: "Rolled on landing".to_owned(),
            date: Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap(),
            sport: "Basketball".to_owned(),
            symptoms: vec!["swelling".to_owned(), "bruising".to_owned()],
            severity: None,
        }
    }

    #[test]
    fn test_analysis_prompt_contains_report_fields() {
        let messages = injury_analysis_messages(&ankle());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert!(messages[0].content.contains("professional medical advice"));

        let user = &messages[1].content;
        assert!(user.starts_with("Analyze this injury:"));
        assert!(user.contains("Body Part: Left Ankle"));
        assert!(user.contains("Date: March 4, 2025"));
        assert!(user.contains("Symptoms: swelling, bruising"));
        assert!(user.contains("3. Warning signs"));
    }

    #[test]
    fn test_recovery_plan_prompt_defaults() {
        let mut details = ankle();
        details.symptoms.clear();
        let messages = recovery_plan_messages(&details, InjuryStatus::Active, "  Plays twice a week ");
        let user = &messages[1].content;
        assert!(user.contains("Symptoms: Not specified"));
        assert!(user.contains("Severity: Not specified"));
        assert!(user.contains("Status: active"));
        assert!(user.contains("Additional Information:\nPlays twice a week\n"));
        assert!(user.contains("5. Importance of sleep and rest"));
    }

    #[test]
    fn test_progress_prompt_lists_series() {
        let entries: Vec<ProgressEntry> = [(6, "stiff"), (4, "better")]
            .into_iter()
            .enumerate()
            .map(|(day, (pain, notes))| ProgressEntry {
                id: format!("p{day}"),
                user_id: "u1".to_owned(),
                injury_id: "i1".to_owned(),
                date: Utc.with_ymd_and_hms(2025, 3, 10 + day as u32, 9, 0, 0).unwrap(),
                pain_level: pain,
                mobility: 5,
                swelling: 3,
                notes: notes.to_owned(),
                exercises: Vec::new(),
            })
            .collect();

        let messages = progress_analysis_messages(&ankle(), &entries);
        let user = &messages[1].content;
        assert!(user.contains("- Sport: Basketball"));
        assert!(user.contains("Pain Levels: 6, 4"));
        assert!(user.contains("Dates: March 10, 2025, March 11, 2025"));
        assert!(user.contains("Notes: stiff, better"));
        assert!(user.ends_with("4. Suggested next steps"));
    }
}
