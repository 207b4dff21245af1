// ABOUTME: Workout catalog database operations
// ABOUTME: Catalog rows are written by seeding and read by every scheduling path

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{get_optional_string, get_string, get_timestamp, get_u32, get_uuid};
use super::Database;
use crate::constants::limits::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, Workout, WorkoutFilter, WorkoutType};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use uuid::Uuid;

pub(super) const WORKOUT_COLUMNS: &str =
    "id, title, description, duration_minutes, difficulty, workout_type, created_at";

/// Insert a workout definition
///
/// # Errors
///
/// Returns an error if the id already exists or the insert fails
pub async fn insert(conn: &mut SqliteConnection, workout: &Workout) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO workouts (id, title, description, duration_minutes, difficulty,
                              workout_type, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(workout.id.to_string())
    .bind(&workout.title)
    .bind(&workout.description)
    .bind(i64::from(workout.duration_minutes))
    .bind(workout.difficulty.as_str())
    .bind(workout.workout_type.as_str())
    .bind(workout.created_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;
    Ok(())
}

/// Look up a workout by id
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get(conn: &mut SqliteConnection, workout_id: Uuid) -> AppResult<Option<Workout>> {
    let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1");
    let row = sqlx::query(&query)
        .bind(workout_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

    row.as_ref().map(row_to_workout).transpose()
}

impl Database {
    /// Create workouts table
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 0),
                difficulty TEXT NOT NULL CHECK (difficulty IN ('beginner', 'intermediate', 'advanced')),
                workout_type TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_workouts_difficulty ON workouts(difficulty)",
            "CREATE INDEX IF NOT EXISTS idx_workouts_type ON workouts(workout_type)",
        ])
        .await
    }

    /// Create a workout definition
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<Uuid> {
        let mut conn = self.acquire().await?;
        insert(&mut conn, workout).await?;
        Ok(workout.id)
    }

    /// Get a workout by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let mut conn = self.acquire().await?;
        get(&mut conn, workout_id).await
    }

    /// List workouts matching a filter, ordered by title
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_workouts(&self, filter: &WorkoutFilter) -> AppResult<Vec<Workout>> {
        let mut conditions = Vec::new();
        if filter.difficulty.is_some() {
            conditions.push("difficulty = ?");
        }
        if filter.workout_type.is_some() {
            conditions.push("workout_type = ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts {where_clause} ORDER BY title, id LIMIT ? OFFSET ?"
        );

        let mut sql = sqlx::query(&query);
        if let Some(difficulty) = filter.difficulty {
            sql = sql.bind(difficulty.as_str());
        }
        if let Some(workout_type) = filter.workout_type {
            sql = sql.bind(workout_type.as_str());
        }
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(MAX_LIST_LIMIT);
        let rows = sql
            .bind(i64::from(limit))
            .bind(i64::from(filter.offset.unwrap_or(0)))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }
}

pub(super) fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: get_uuid(row, "id")?,
        title: get_string(row, "title")?,
        description: get_optional_string(row, "description")?,
        duration_minutes: get_u32(row, "duration_minutes")?,
        difficulty: Difficulty::parse(&get_string(row, "difficulty")?),
        workout_type: WorkoutType::parse(&get_string(row, "workout_type")?),
        created_at: get_timestamp(row, "created_at")?,
    })
}
