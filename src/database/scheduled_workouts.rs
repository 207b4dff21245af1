// ABOUTME: Scheduled workout database operations and the completion compare-and-swap
// ABOUTME: Every write is addressed by the scheduled row id, never by workout id

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{
    flag, format_date, get_bool, get_date, get_optional_u32, get_optional_uuid, get_timestamp,
    get_uuid,
};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::ScheduledWorkout;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use uuid::Uuid;

const SCHEDULED_COLUMNS: &str = "id, user_id, workout_id, scheduled_date, is_completed, \
                                 program_id, program_day, created_at, updated_at";

/// Insert one scheduled occurrence
///
/// # Errors
///
/// Returns an error if a referenced row is missing or the insert fails
pub async fn insert(conn: &mut SqliteConnection, scheduled: &ScheduledWorkout) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO scheduled_workouts (id, user_id, workout_id, scheduled_date, is_completed,
                                        program_id, program_day, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ",
    )
    .bind(scheduled.id.to_string())
    .bind(scheduled.user_id.to_string())
    .bind(scheduled.workout_id.to_string())
    .bind(format_date(scheduled.scheduled_date))
    .bind(flag(scheduled.is_completed))
    .bind(scheduled.program_id.map(|id| id.to_string()))
    .bind(scheduled.program_day.map(i64::from))
    .bind(scheduled.created_at.to_rfc3339())
    .bind(scheduled.updated_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to schedule workout: {e}")))?;
    Ok(())
}

/// Look up an occurrence owned by `user_id`
///
/// Rows belonging to other users are reported as absent.
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get_for_user(
    conn: &mut SqliteConnection,
    scheduled_workout_id: Uuid,
    user_id: Uuid,
) -> AppResult<Option<ScheduledWorkout>> {
    let query = format!(
        "SELECT {SCHEDULED_COLUMNS} FROM scheduled_workouts WHERE id = $1 AND user_id = $2"
    );
    let row = sqlx::query(&query)
        .bind(scheduled_workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get scheduled workout: {e}")))?;

    row.as_ref().map(row_to_scheduled_workout).transpose()
}

/// Set the completion flag only if it differs from the stored value
///
/// Returns `true` when the row transitioned. Two concurrent calls with the same
/// target state see exactly one transition.
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn mark_completed(
    conn: &mut SqliteConnection,
    scheduled_workout_id: Uuid,
    is_completed: bool,
    updated_at: DateTime<Utc>,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE scheduled_workouts
        SET is_completed = $1, updated_at = $2
        WHERE id = $3 AND is_completed != $4
        ",
    )
    .bind(flag(is_completed))
    .bind(updated_at.to_rfc3339())
    .bind(scheduled_workout_id.to_string())
    .bind(flag(is_completed))
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to update completion state: {e}")))?;

    Ok(result.rows_affected() == 1)
}

impl Database {
    /// Create scheduled_workouts table
    pub(super) async fn migrate_scheduled_workouts(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS scheduled_workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                scheduled_date TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                program_id TEXT REFERENCES programs(id),
                program_day INTEGER CHECK (program_day IS NULL OR program_day >= 1),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_scheduled_workouts_user_date
            ON scheduled_workouts(user_id, scheduled_date)
            ",
        ])
        .await
    }

    /// Insert one scheduled occurrence
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_scheduled_workout(&self, scheduled: &ScheduledWorkout) -> AppResult<()> {
        let mut conn = self.acquire().await?;
        insert(&mut conn, scheduled).await
    }

    /// Get an occurrence owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_scheduled_workout(
        &self,
        scheduled_workout_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ScheduledWorkout>> {
        let mut conn = self.acquire().await?;
        get_for_user(&mut conn, scheduled_workout_id, user_id).await
    }

    /// Compare-and-swap the completion flag of one occurrence
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_scheduled_workout_completed(
        &self,
        scheduled_workout_id: Uuid,
        is_completed: bool,
    ) -> AppResult<bool> {
        let mut conn = self.acquire().await?;
        mark_completed(&mut conn, scheduled_workout_id, is_completed, Utc::now()).await
    }

    /// A user's occurrences on one date, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_scheduled_workouts_by_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        let query = format!(
            "SELECT {SCHEDULED_COLUMNS} FROM scheduled_workouts \
             WHERE user_id = $1 AND scheduled_date = $2 \
             ORDER BY created_at, program_day, id"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(format_date(date))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list scheduled workouts: {e}")))?;

        rows.iter().map(row_to_scheduled_workout).collect()
    }

    /// A user's occurrences between two dates, both inclusive, in date order
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_scheduled_workouts_by_date_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        let query = format!(
            "SELECT {SCHEDULED_COLUMNS} FROM scheduled_workouts \
             WHERE user_id = $1 AND scheduled_date >= $2 AND scheduled_date <= $3 \
             ORDER BY scheduled_date, created_at, program_day, id"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(format_date(start))
            .bind(format_date(end))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list scheduled workouts: {e}")))?;

        rows.iter().map(row_to_scheduled_workout).collect()
    }
}

fn row_to_scheduled_workout(row: &SqliteRow) -> AppResult<ScheduledWorkout> {
    Ok(ScheduledWorkout {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        workout_id: get_uuid(row, "workout_id")?,
        scheduled_date: get_date(row, "scheduled_date")?,
        is_completed: get_bool(row, "is_completed")?,
        program_id: get_optional_uuid(row, "program_id")?,
        program_day: get_optional_u32(row, "program_day")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use super::*;
    use crate::models::{Difficulty, User, Workout, WorkoutType};

    async fn seed_user_and_workout(db: &Database) -> (User, Workout) {
        let user = User::new("d@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();
        let workout = Workout::new("Swim", 40, Difficulty::Beginner, WorkoutType::Endurance);
        db.create_workout(&workout).await.unwrap();
        (user, workout)
    }

    #[tokio::test]
    async fn test_mark_completed_only_transitions_once() {
        let db = create_test_db().await.unwrap();
        let (user, workout) = seed_user_and_workout(&db).await;
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let scheduled = ScheduledWorkout::new(user.id, workout.id, date, None, None);
        db.insert_scheduled_workout(&scheduled).await.unwrap();

        assert!(db
            .mark_scheduled_workout_completed(scheduled.id, true)
            .await
            .unwrap());
        assert!(!db
            .mark_scheduled_workout_completed(scheduled.id, true)
            .await
            .unwrap());
        assert!(db
            .mark_scheduled_workout_completed(scheduled.id, false)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_range_is_inclusive_and_owner_scoped() {
        let db = create_test_db().await.unwrap();
        let (user, workout) = seed_user_and_workout(&db).await;
        let other = User::new("e@example.com".into(), "hash".into(), None);
        db.create_user(&other).await.unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        for d in [1, 3, 5, 7] {
            db.insert_scheduled_workout(&ScheduledWorkout::new(
                user.id, workout.id, day(d), None, None,
            ))
            .await
            .unwrap();
        }
        db.insert_scheduled_workout(&ScheduledWorkout::new(
            other.id,
            workout.id,
            day(3),
            None,
            None,
        ))
        .await
        .unwrap();

        let found = db
            .get_scheduled_workouts_by_date_range(user.id, day(3), day(5))
            .await
            .unwrap();
        let dates: Vec<_> = found.iter().map(|s| s.scheduled_date).collect();
        assert_eq!(dates, [day(3), day(5)]);

        let on_third = db
            .get_scheduled_workouts_by_date(other.id, day(3))
            .await
            .unwrap();
        assert_eq!(on_third.len(), 1);
        assert_eq!(on_third[0].user_id, other.id);
    }
}
