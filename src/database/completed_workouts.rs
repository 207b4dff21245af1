// ABOUTME: Completion history database operations
// ABOUTME: Rows are appended on each completion transition and never updated or deleted

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{format_date, get_optional_date, get_timestamp, get_u32, get_uuid};
use super::Database;
use crate::constants::limits::DEFAULT_HISTORY_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::models::CompletedWorkout;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

/// Append one completion record
///
/// # Errors
///
/// Returns an error if the insert fails
pub async fn insert(conn: &mut SqliteConnection, completed: &CompletedWorkout) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO completed_workouts (id, user_id, scheduled_workout_id, workout_id,
                                        scheduled_date, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(completed.id.to_string())
    .bind(completed.user_id.to_string())
    .bind(completed.scheduled_workout_id.to_string())
    .bind(completed.workout_id.to_string())
    .bind(completed.scheduled_date.map(format_date))
    .bind(completed.completed_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to record completed workout: {e}")))?;
    Ok(())
}

impl Database {
    /// Create completed_workouts table
    pub(super) async fn migrate_completed_workouts(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS completed_workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                scheduled_workout_id TEXT NOT NULL REFERENCES scheduled_workouts(id),
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                scheduled_date TEXT,
                completed_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_completed_workouts_user
            ON completed_workouts(user_id, completed_at)
            ",
        ])
        .await
    }

    /// Append one completion record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_completed_workout(&self, completed: &CompletedWorkout) -> AppResult<()> {
        let mut conn = self.acquire().await?;
        insert(&mut conn, completed).await
    }

    /// A user's completion history, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> AppResult<Vec<CompletedWorkout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, scheduled_workout_id, workout_id, scheduled_date, completed_at
            FROM completed_workouts
            WHERE user_id = $1
            ORDER BY completed_at DESC, id
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list completed workouts: {e}")))?;

        rows.iter().map(row_to_completed_workout).collect()
    }

    /// Number of distinct occurrences a user has completed
    ///
    /// Re-completing the same occurrence after un-completing it does not count twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_completed_workouts(&self, user_id: Uuid) -> AppResult<u32> {
        let row = sqlx::query(
            r"
            SELECT COUNT(DISTINCT scheduled_workout_id) AS total
            FROM completed_workouts
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count completed workouts: {e}")))?;

        get_u32(&row, "total")
    }

    /// Completion timestamps for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn completion_dates(&self, user_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        let rows = sqlx::query(
            "SELECT completed_at FROM completed_workouts WHERE user_id = $1 ORDER BY completed_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get completion dates: {e}")))?;

        rows.iter()
            .map(|row| {
                let raw: String = row.try_get("completed_at").map_err(|e| {
                    AppError::database(format!("Failed to get column 'completed_at': {e}"))
                })?;
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc).date_naive())
                    .map_err(|e| AppError::database(format!("Invalid completion timestamp: {e}")))
            })
            .collect()
    }
}

fn row_to_completed_workout(row: &SqliteRow) -> AppResult<CompletedWorkout> {
    Ok(CompletedWorkout {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        scheduled_workout_id: get_uuid(row, "scheduled_workout_id")?,
        workout_id: get_uuid(row, "workout_id")?,
        scheduled_date: get_optional_date(row, "scheduled_date")?,
        completed_at: get_timestamp(row, "completed_at")?,
    })
}
