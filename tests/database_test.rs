// ABOUTME: Integration tests for the on-disk SQLite store
// ABOUTME: Verifies schedules and progress survive a reopen and that migrations are repeatable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_program, create_test_user, create_test_workout, date, init_test_logging};
use fittrack_server::database::Database;
use fittrack_server::errors::ErrorCode;
use fittrack_server::models::User;
use fittrack_server::services::{CompletionReconciler, SchedulingEngine, SchedulingPolicy};
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("fittrack.db").display())
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    let (user_id, user_program_id) = {
        let db = Database::new(&url).await.unwrap();
        let user = create_test_user(&db, "disk@example.com").await.unwrap();
        let w1 = create_test_workout(&db, "W1").await.unwrap();
        let program = create_test_program(&db, "Disk", 3, &[&w1]).await.unwrap();

        let assignment = SchedulingEngine::new(db.clone(), SchedulingPolicy::default())
            .assign_program_starting(user.id, program.id, date(2025, 4, 1))
            .await
            .unwrap();
        CompletionReconciler::new(db.clone())
            .set_completion(assignment.scheduled_workouts[0].id, user.id, true)
            .await
            .unwrap();

        (user.id, assignment.user_program.id)
    };

    // Reopening runs migrations again over the existing schema
    let db = Database::new(&url).await.unwrap();
    let reopened = db.get_user_program(user_program_id).await.unwrap().unwrap();
    assert!(reopened.is_active);
    assert_eq!(reopened.current_day, 2);

    let rows = db
        .get_scheduled_workouts_by_date_range(user_id, date(2025, 4, 1), date(2025, 4, 30))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].is_completed);
    assert!(!rows[1].is_completed);

    assert_eq!(db.count_completed_workouts(user_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_email_uniqueness_is_enforced_by_the_store() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let db = Database::new(&database_url(&dir)).await.unwrap();

    create_test_user(&db, "same@example.com").await.unwrap();
    let duplicate = User::new("same@example.com".into(), "hash".into(), None);
    let err = db.create_user(&duplicate).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let found = db.get_user_by_email("same@example.com").await.unwrap().unwrap();
    assert_ne!(found.id, duplicate.id);
}
