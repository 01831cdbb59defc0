// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, injury, plan, and progress fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `injury_tracker`

use std::env;
use std::sync::Once;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use injury_tracker::config::DatabaseUrl;
use injury_tracker::database::Database;
use injury_tracker::models::{
    CompletedExercise, Exercise, Injury, InjuryDetails, NewProgressEntry, NewRecoveryPlan,
    ProgressEntry, RecoveryPlan,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

pub const TEST_USER: &str = "user-1";
pub const OTHER_USER: &str = "user-2";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

pub fn sample_details() -> InjuryDetails {
    InjuryDetails {
        body_part: "Left Knee".to_owned(),
        cause: "Twisted while landing".to_owned(),
        date: Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap(),
        sport: "Basketball".to_owned(),
        symptoms: vec!["swelling".to_owned(), "sharp pain".to_owned()],
        severity: None,
    }
}

pub async fn create_injury(database: &Database, user_id: &str) -> Result<Injury> {
    Ok(database
        .injuries()
        .add(user_id, &sample_details(), Vec::new())
        .await?)
}

/// Bridge 3x10 (id `ex-bridge`) and Clamshell 2x15 (no id)
pub fn sample_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new("Bridge", 3, 10).with_id("ex-bridge"),
        Exercise::new("Clamshell", 2, 15),
    ]
}

pub async fn create_plan(
    database: &Database,
    injury_id: &str,
    exercises: Vec<Exercise>,
) -> Result<RecoveryPlan> {
    Ok(database
        .recovery_plans()
        .add(NewRecoveryPlan {
            injury_id: injury_id.to_owned(),
            exercises,
            timeline: "6 weeks".to_owned(),
            milestones: Vec::new(),
        })
        .await?)
}

pub fn new_entry(injury_id: &str, pain: u8, mobility: u8) -> NewProgressEntry {
    NewProgressEntry {
        user_id: TEST_USER.to_owned(),
        injury_id: injury_id.to_owned(),
        pain_level: pain,
        mobility,
        swelling: 3,
        notes: String::new(),
        exercises: Vec::new(),
    }
}

pub async fn log_progress(
    database: &Database,
    injury_id: &str,
    pain: u8,
    mobility: u8,
) -> Result<ProgressEntry> {
    Ok(database
        .progress()
        .add(new_entry(injury_id, pain, mobility))
        .await?)
}

pub async fn log_progress_with(
    database: &Database,
    injury_id: &str,
    pain: u8,
    mobility: u8,
    completed: Vec<CompletedExercise>,
) -> Result<ProgressEntry> {
    let mut entry = new_entry(injury_id, pain, mobility);
    entry.exercises = completed;
    Ok(database.progress().add(entry).await?)
}
