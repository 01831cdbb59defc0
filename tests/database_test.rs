// ABOUTME: Integration tests for the SQLite document store
// ABOUTME: Covers injury ownership, progress ordering, plan history, alerts, and cascading deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    create_injury, create_plan, create_test_database, log_progress, new_entry, sample_details,
    sample_exercises, OTHER_USER, TEST_USER,
};
use injury_tracker::config::DatabaseUrl;
use injury_tracker::constants::adjustment::ADJUSTMENT_ALERT_ACTION;
use injury_tracker::database::Database;
use injury_tracker::errors::ErrorCode;
use injury_tracker::models::{AdjustmentType, AlertType, Exercise, InjuryStatus};

// ============================================================================
// Injuries
// ============================================================================

#[tokio::test]
async fn test_add_and_get_injury() {
    let database = create_test_database().await.unwrap();
    let injury = database
        .injuries()
        .add(TEST_USER, &sample_details(), vec!["ACL sprain".to_owned()])
        .await
        .unwrap();

    assert_eq!(injury.status, InjuryStatus::Active);
    assert_eq!(injury.user_id, TEST_USER);

    let stored = database.injuries().get(&injury.id).await.unwrap().unwrap();
    assert_eq!(stored, injury);
    assert_eq!(stored.possible_injuries, vec!["ACL sprain".to_owned()]);
}

#[tokio::test]
async fn test_add_injury_requires_user() {
    let database = create_test_database().await.unwrap();
    let err = database
        .injuries()
        .add("", &sample_details(), Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_add_injury_rejects_missing_body_part() {
    let database = create_test_database().await.unwrap();
    let mut details = sample_details();
    details.body_part = "  ".to_owned();
    assert!(database
        .injuries()
        .add(TEST_USER, &details, Vec::new())
        .await
        .is_err());
}

#[tokio::test]
async fn test_get_owned_checks_owner() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();

    let owned = database
        .injuries()
        .get_owned(TEST_USER, &injury.id)
        .await
        .unwrap();
    assert_eq!(owned.id, injury.id);

    let denied = database
        .injuries()
        .get_owned(OTHER_USER, &injury.id)
        .await
        .unwrap_err();
    assert_eq!(denied.code, ErrorCode::PermissionDenied);

    let missing = database
        .injuries()
        .get_owned(TEST_USER, "no-such-injury")
        .await
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_list_for_user_newest_first() {
    let database = create_test_database().await.unwrap();
    let first = create_injury(&database, TEST_USER).await.unwrap();
    let second = create_injury(&database, TEST_USER).await.unwrap();
    create_injury(&database, OTHER_USER).await.unwrap();

    let injuries = database.injuries().list_for_user(TEST_USER).await.unwrap();
    let ids: Vec<_> = injuries.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[tokio::test]
async fn test_update_status() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();

    let updated = database
        .injuries()
        .update_status(TEST_USER, &injury.id, InjuryStatus::Recovered)
        .await
        .unwrap();
    assert_eq!(updated.status, InjuryStatus::Recovered);
    assert!(updated.updated_at >= injury.updated_at);

    let err = database
        .injuries()
        .update_status(OTHER_USER, &injury.id, InjuryStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_delete_injury_removes_related_records() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let plan = create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();
    log_progress(&database, &injury.id, 4, 5).await.unwrap();
    let alert = database
        .alerts()
        .create(&injury.id, AlertType::Warning, "Pain is rising", None)
        .await
        .unwrap();

    let denied = database
        .injuries()
        .delete(OTHER_USER, &injury.id)
        .await
        .unwrap_err();
    assert_eq!(denied.code, ErrorCode::PermissionDenied);

    database
        .injuries()
        .delete(TEST_USER, &injury.id)
        .await
        .unwrap();

    assert!(database.injuries().get(&injury.id).await.unwrap().is_none());
    assert!(database.recovery_plans().get(&plan.id).await.unwrap().is_none());
    assert!(database.alerts().get(&alert.id).await.unwrap().is_none());
    assert!(database
        .progress()
        .recent_for_adjustment(&injury.id, 10)
        .await
        .unwrap()
        .is_empty());
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn test_progress_rejects_out_of_range_scores() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();

    let err = database
        .progress()
        .add(new_entry(&injury.id, 11, 5))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let err = database
        .progress()
        .add(new_entry(&injury.id, 5, 0))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test]
async fn test_progress_requires_injury_owner() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, OTHER_USER).await.unwrap();

    let err = database
        .progress()
        .add(new_entry(&injury.id, 4, 5))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_progress_ordering() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let first = log_progress(&database, &injury.id, 6, 3).await.unwrap();
    let second = log_progress(&database, &injury.id, 5, 4).await.unwrap();
    let third = log_progress(&database, &injury.id, 4, 5).await.unwrap();

    let listed = database
        .progress()
        .list_for_injury(TEST_USER, &injury.id)
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone(), third.id.clone()]);
    assert_eq!(listed[0], first);

    let recent = database
        .progress()
        .recent_for_adjustment(&injury.id, 2)
        .await
        .unwrap();
    let ids: Vec<_> = recent.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![third.id, second.id]);
}

#[tokio::test]
async fn test_progress_for_deleted_injury_is_not_stored() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    database
        .injuries()
        .delete(TEST_USER, &injury.id)
        .await
        .unwrap();

    let err = database
        .progress()
        .add(new_entry(&injury.id, 4, 5))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
        .fetch_one(database.pool())
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_progress_with_corrupt_score_fails_to_load() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let entry = log_progress(&database, &injury.id, 4, 5).await.unwrap();

    sqlx::query("UPDATE progress SET pain_level = 300 WHERE id = $1")
        .bind(&entry.id)
        .execute(database.pool())
        .await
        .unwrap();

    let err = database
        .progress()
        .list_for_injury(TEST_USER, &injury.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);

    let err = database
        .progress()
        .recent_for_adjustment(&injury.id, 5)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);
}

// ============================================================================
// Recovery plans
// ============================================================================

#[tokio::test]
async fn test_plan_rejects_invalid_exercise() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    assert!(create_plan(&database, &injury.id, vec![Exercise::new("", 3, 10)])
        .await
        .is_err());
}

#[tokio::test]
async fn test_latest_plan_for_injury() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    assert!(database
        .recovery_plans()
        .latest_for_injury(&injury.id)
        .await
        .unwrap()
        .is_none());

    create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();
    let newer = create_plan(&database, &injury.id, vec![Exercise::new("Plank", 3, 30)])
        .await
        .unwrap();

    let latest = database
        .recovery_plans()
        .latest_for_injury(&injury.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newer.id);
    assert!(latest.last_adjusted.is_none());
    assert!(latest.adjustment_history.is_empty());
}

#[tokio::test]
async fn test_update_with_exercises_records_history_and_alert() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let plan = create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();

    let adjusted = vec![
        Exercise::new("Bridge", 3, 12).with_id("ex-bridge"),
        Exercise::new("Clamshell", 1, 12),
    ];
    let updated = database
        .recovery_plans()
        .update_with_exercises(&plan, &adjusted, "Your plan changed")
        .await
        .unwrap();

    assert_eq!(updated.exercises, adjusted);
    assert!(updated.last_adjusted.is_some());
    assert_eq!(updated.adjustment_history.len(), 2);

    let bridge = &updated.adjustment_history[0];
    assert_eq!(bridge.adjustment_type, AdjustmentType::Increase);
    assert_eq!((bridge.previous_sets, bridge.previous_reps), (3, 10));
    assert_eq!((bridge.new_sets, bridge.new_reps), (3, 12));

    let clamshell = &updated.adjustment_history[1];
    assert_eq!(clamshell.adjustment_type, AdjustmentType::Decrease);

    let stored = database.recovery_plans().get(&plan.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);

    let alerts = database.alerts().list_for_injury(&injury.id).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, AlertType::Adjustment);
    assert_eq!(alerts[0].message, "Your plan changed");
    assert_eq!(alerts[0].action.as_deref(), Some(ADJUSTMENT_ALERT_ACTION));
    assert!(!alerts[0].read);
}

#[tokio::test]
async fn test_update_with_empty_summary_skips_alert() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let plan = create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();

    database
        .recovery_plans()
        .update_with_exercises(&plan, &sample_exercises(), "")
        .await
        .unwrap();
    assert!(database
        .alerts()
        .list_for_injury(&injury.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_missing_plan() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let mut missing = create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();
    missing.id = "no-such-plan".to_owned();

    let err = database
        .recovery_plans()
        .update_with_exercises(&missing, &sample_exercises(), "summary")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_update_from_stale_plan_is_rejected() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let plan = create_plan(&database, &injury.id, sample_exercises())
        .await
        .unwrap();

    let first = vec![
        Exercise::new("Bridge", 3, 12).with_id("ex-bridge"),
        Exercise::new("Clamshell", 2, 15),
    ];
    let updated = database
        .recovery_plans()
        .update_with_exercises(&plan, &first, "First adjustment")
        .await
        .unwrap();

    // A second writer that read the plan before the first update landed
    let second = vec![
        Exercise::new("Bridge", 2, 8).with_id("ex-bridge"),
        Exercise::new("Clamshell", 2, 15),
    ];
    let err = database
        .recovery_plans()
        .update_with_exercises(&plan, &second, "Second adjustment")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);

    let stored = database.recovery_plans().get(&plan.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.exercises, first);
    assert_eq!(stored.adjustment_history.len(), 2);

    let alerts = database.alerts().list_for_injury(&injury.id).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "First adjustment");

    let retried = database
        .recovery_plans()
        .update_with_exercises(&stored, &second, "Second adjustment")
        .await
        .unwrap();
    assert_eq!(retried.exercises, second);
}

// ============================================================================
// Alerts
// ============================================================================

#[tokio::test]
async fn test_mark_alert_read() {
    let database = create_test_database().await.unwrap();
    let injury = create_injury(&database, TEST_USER).await.unwrap();
    let alert = database
        .alerts()
        .create(
            &injury.id,
            AlertType::Milestone,
            "Full range of motion",
            Some("Review milestones"),
        )
        .await
        .unwrap();

    database.alerts().mark_read(&alert.id).await.unwrap();
    let stored = database.alerts().get(&alert.id).await.unwrap().unwrap();
    assert!(stored.read);
    assert_eq!(stored.action.as_deref(), Some("Review milestones"));

    let err = database.alerts().mark_read("missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// File-backed storage
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("injuries.db"),
    };

    let injury_id = {
        let database = Database::new(&url).await.unwrap();
        create_injury(&database, TEST_USER).await.unwrap().id
    };

    let reopened = Database::new(&url).await.unwrap();
    let injury = reopened.injuries().get(&injury_id).await.unwrap().unwrap();
    assert_eq!(injury.body_part, "Left Knee");
}
