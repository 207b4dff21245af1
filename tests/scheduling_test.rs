// ABOUTME: Integration tests for program assignment and calendar reads
// ABOUTME: Covers day expansion, one-active-program conflicts, atomicity, and range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    create_test_database, create_test_program, create_test_user, create_test_workout, date,
};
use fittrack_server::errors::ErrorCode;
use fittrack_server::models::Program;
use fittrack_server::models::Difficulty;
use fittrack_server::services::{ScheduleRequest, SchedulingEngine, SchedulingPolicy};
use uuid::Uuid;

fn engine(database: &fittrack_server::database::Database) -> SchedulingEngine {
    SchedulingEngine::new(database.clone(), SchedulingPolicy::default())
}

#[tokio::test]
async fn test_assign_expands_program_into_spaced_cycling_days() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "runner@example.com").await.unwrap();
    let w1 = create_test_workout(&db, "W1").await.unwrap();
    let w2 = create_test_workout(&db, "W2").await.unwrap();
    let program = create_test_program(&db, "Starter", 5, &[&w1, &w2])
        .await
        .unwrap();
    let start = date(2025, 3, 3);

    let assignment = engine(&db)
        .assign_program_starting(user.id, program.id, start)
        .await
        .unwrap();

    assert!(assignment.user_program.is_active);
    assert_eq!(assignment.user_program.current_day, 1);
    assert!(assignment.user_program.completed_at.is_none());

    let rows = assignment.scheduled_workouts;
    assert_eq!(rows.len(), 5);

    let expected_workouts = [w1.id, w2.id, w1.id, w2.id, w1.id];
    for (index, row) in rows.iter().enumerate() {
        let offset = i64::try_from(index).unwrap() * 3;
        assert_eq!(row.program_day, Some(u32::try_from(index).unwrap() + 1));
        assert_eq!(row.workout_id, expected_workouts[index]);
        assert_eq!(row.scheduled_date, start + Duration::days(offset));
        assert_eq!(row.program_id, Some(program.id));
        assert!(!row.is_completed);
    }

    // Persisted, not just returned
    let stored = db
        .get_scheduled_workouts_by_date_range(user.id, start, start + Duration::days(12))
        .await
        .unwrap();
    assert_eq!(stored.len(), 5);
    let active = db.get_active_user_program(user.id).await.unwrap().unwrap();
    assert_eq!(active.id, assignment.user_program.id);
}

#[tokio::test]
async fn test_assign_uses_configured_interval() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "daily@example.com").await.unwrap();
    let w1 = create_test_workout(&db, "Daily").await.unwrap();
    let program = create_test_program(&db, "Daily plan", 3, &[&w1])
        .await
        .unwrap();
    let start = date(2025, 1, 30);

    let daily = SchedulingEngine::new(db.clone(), SchedulingPolicy::new(1).unwrap());
    let assignment = daily
        .assign_program_starting(user.id, program.id, start)
        .await
        .unwrap();

    let dates: Vec<_> = assignment
        .scheduled_workouts
        .iter()
        .map(|row| row.scheduled_date)
        .collect();
    assert_eq!(dates, vec![date(2025, 1, 30), date(2025, 1, 31), date(2025, 2, 1)]);
}

#[tokio::test]
async fn test_second_active_program_conflicts_and_writes_nothing() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "busy@example.com").await.unwrap();
    let w1 = create_test_workout(&db, "W1").await.unwrap();
    let first = create_test_program(&db, "First", 2, &[&w1]).await.unwrap();
    let second = create_test_program(&db, "Second", 4, &[&w1]).await.unwrap();
    let start = date(2025, 5, 1);
    let engine = engine(&db);

    engine
        .assign_program_starting(user.id, first.id, start)
        .await
        .unwrap();
    let err = engine
        .assign_program_starting(user.id, second.id, start)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceConflict);

    let programs = db.list_user_programs(user.id).await.unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].program_id, first.id);

    let rows = db
        .get_scheduled_workouts_by_date_range(user.id, start, start + Duration::days(30))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_failed_assign_leaves_nothing_behind() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "empty@example.com").await.unwrap();
    let start = date(2025, 5, 1);

    // A program with no workouts cannot be expanded
    let empty = Program::new("Empty", 3, Difficulty::Beginner);
    db.create_program(&empty, &[]).await.unwrap();

    let err = engine(&db)
        .assign_program_starting(user.id, empty.id, start)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    assert!(db.list_user_programs(user.id).await.unwrap().is_empty());
    assert!(db
        .get_scheduled_workouts_by_date_range(user.id, start, start + Duration::days(30))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_assign_unknown_program_is_not_found() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "lost@example.com").await.unwrap();

    let err = engine(&db)
        .assign_program(user.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(db.list_user_programs(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assign_after_unsubscribe_is_allowed() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "again@example.com").await.unwrap();
    let w1 = create_test_workout(&db, "W1").await.unwrap();
    let program = create_test_program(&db, "Repeatable", 2, &[&w1])
        .await
        .unwrap();
    let engine = engine(&db);
    let reconciler = fittrack_server::services::CompletionReconciler::new(db.clone());

    let first = engine
        .assign_program_starting(user.id, program.id, date(2025, 1, 1))
        .await
        .unwrap();
    reconciler
        .unsubscribe(first.user_program.id, user.id)
        .await
        .unwrap();

    let second = engine
        .assign_program_starting(user.id, program.id, date(2025, 2, 1))
        .await
        .unwrap();
    assert_ne!(first.user_program.id, second.user_program.id);
    assert_eq!(db.list_user_programs(user.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_schedule_ad_hoc_workout() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "adhoc@example.com").await.unwrap();
    let workout = create_test_workout(&db, "Solo").await.unwrap();
    let day = date(2025, 7, 4);

    let scheduled = engine(&db)
        .schedule_workout(ScheduleRequest {
            user_id: user.id,
            workout_id: workout.id,
            scheduled_date: day,
            program_id: None,
            program_day: None,
        })
        .await
        .unwrap();

    assert!(!scheduled.is_completed);
    assert!(scheduled.program_id.is_none());

    let on_day = engine(&db).list_scheduled_by_date(user.id, day).await.unwrap();
    assert_eq!(on_day.len(), 1);
    assert_eq!(on_day[0].id, scheduled.id);
}

#[tokio::test]
async fn test_schedule_validation_errors() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "strict@example.com").await.unwrap();
    let workout = create_test_workout(&db, "Solo").await.unwrap();
    let program = create_test_program(&db, "P", 3, &[&workout]).await.unwrap();
    let engine = engine(&db);
    let day = date(2025, 7, 4);

    let request = |workout_id, program_id, program_day| ScheduleRequest {
        user_id: user.id,
        workout_id,
        scheduled_date: day,
        program_id,
        program_day,
    };

    let err = engine
        .schedule_workout(request(workout.id, None, Some(2)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let err = engine
        .schedule_workout(request(workout.id, Some(program.id), Some(0)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    // Program "P" runs three days
    let err = engine
        .schedule_workout(request(workout.id, Some(program.id), Some(4)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let err = engine
        .schedule_workout(request(Uuid::new_v4(), None, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = engine
        .schedule_workout(request(workout.id, Some(Uuid::new_v4()), Some(1)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // None of the failures wrote a row
    assert!(engine
        .list_scheduled_by_date(user.id, day)
        .await
        .unwrap()
        .is_empty());

    // A program-linked occurrence with a valid day is accepted
    let linked = engine
        .schedule_workout(request(workout.id, Some(program.id), Some(2)))
        .await
        .unwrap();
    assert_eq!(linked.program_day, Some(2));
}

#[tokio::test]
async fn test_range_reads_are_inclusive_ordered_and_scoped() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "range@example.com").await.unwrap();
    let other = create_test_user(&db, "other@example.com").await.unwrap();
    let w1 = create_test_workout(&db, "W1").await.unwrap();
    let program = create_test_program(&db, "P", 5, &[&w1]).await.unwrap();
    let engine = engine(&db);
    let start = date(2025, 3, 3);

    engine
        .assign_program_starting(user.id, program.id, start)
        .await
        .unwrap();
    engine
        .assign_program_starting(other.id, program.id, start)
        .await
        .unwrap();

    // Days 2..=4 land on +3, +6, +9
    let rows = engine
        .list_scheduled_by_range(user.id, start + Duration::days(3), start + Duration::days(9))
        .await
        .unwrap();
    let days: Vec<_> = rows.iter().filter_map(|r| r.program_day).collect();
    assert_eq!(days, vec![2, 3, 4]);
    assert!(rows.iter().all(|r| r.user_id == user.id));

    // Single-day range equals the by-date read
    let single = engine
        .list_scheduled_by_range(user.id, start, start)
        .await
        .unwrap();
    let by_date = engine.list_scheduled_by_date(user.id, start).await.unwrap();
    assert_eq!(single, by_date);

    // A day with nothing scheduled
    assert!(engine
        .list_scheduled_by_date(user.id, start + Duration::days(1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_range_validation() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "bounds@example.com").await.unwrap();
    let engine = engine(&db);

    let err = engine
        .list_scheduled_by_range(user.id, date(2025, 3, 10), date(2025, 3, 9))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = engine
        .list_scheduled_by_range(user.id, date(2024, 1, 1), date(2025, 1, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    // Exactly 366 days apart is allowed
    let ok = engine
        .list_scheduled_by_range(user.id, date(2024, 1, 1), date(2025, 1, 1))
        .await
        .unwrap();
    assert!(ok.is_empty());
}
