// ABOUTME: Program definition database operations
// ABOUTME: A program owns an ordered list of workouts stored in program_workouts

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{get_optional_string, get_string, get_timestamp, get_u32, get_uuid};
use super::workouts::row_to_workout;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, Program, ProgramWithWorkouts, Workout};
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

const PROGRAM_COLUMNS: &str = "id, title, description, difficulty, duration, created_at";

/// Look up a program by id
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get(conn: &mut SqliteConnection, program_id: Uuid) -> AppResult<Option<Program>> {
    let query = format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1");
    let row = sqlx::query(&query)
        .bind(program_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get program: {e}")))?;

    row.as_ref().map(row_to_program).transpose()
}

/// Workouts of a program in program order
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get_workouts(
    conn: &mut SqliteConnection,
    program_id: Uuid,
) -> AppResult<Vec<Workout>> {
    let rows = sqlx::query(
        r"
        SELECT w.id, w.title, w.description, w.duration_minutes, w.difficulty,
               w.workout_type, w.created_at
        FROM program_workouts pw
        JOIN workouts w ON w.id = pw.workout_id
        WHERE pw.program_id = $1
        ORDER BY pw.position
        ",
    )
    .bind(program_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get program workouts: {e}")))?;

    rows.iter().map(row_to_workout).collect()
}

/// Look up a program together with its ordered workouts
///
/// # Errors
///
/// Returns an error if either query fails
pub async fn get_with_workouts(
    conn: &mut SqliteConnection,
    program_id: Uuid,
) -> AppResult<Option<ProgramWithWorkouts>> {
    let Some(program) = get(&mut *conn, program_id).await? else {
        return Ok(None);
    };
    let workouts = get_workouts(conn, program_id).await?;
    Ok(Some(ProgramWithWorkouts { program, workouts }))
}

impl Database {
    /// Create programs and program_workouts tables
    pub(super) async fn migrate_programs(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                difficulty TEXT NOT NULL CHECK (difficulty IN ('beginner', 'intermediate', 'advanced')),
                duration INTEGER NOT NULL CHECK (duration >= 0),
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS program_workouts (
                program_id TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                PRIMARY KEY (program_id, position)
            )
            ",
        ])
        .await
    }

    /// Create a program with its workouts in the given order
    ///
    /// # Errors
    ///
    /// Returns an error if a workout id does not exist or any insert fails;
    /// nothing is written in that case
    pub async fn create_program(&self, program: &Program, workout_ids: &[Uuid]) -> AppResult<Uuid> {
        let mut guard = self.begin().await?;

        sqlx::query(
            r"
            INSERT INTO programs (id, title, description, difficulty, duration, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(program.id.to_string())
        .bind(&program.title)
        .bind(&program.description)
        .bind(program.difficulty.as_str())
        .bind(i64::from(program.duration))
        .bind(program.created_at.to_rfc3339())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create program: {e}")))?;

        for (position, workout_id) in (0_i64..).zip(workout_ids) {
            sqlx::query(
                "INSERT INTO program_workouts (program_id, position, workout_id) VALUES ($1, $2, $3)",
            )
            .bind(program.id.to_string())
            .bind(position)
            .bind(workout_id.to_string())
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to add program workout: {e}")))?;
        }

        guard.commit().await?;
        info!(
            program_id = %program.id,
            workouts = workout_ids.len(),
            duration = program.duration,
            "Program created"
        );
        Ok(program.id)
    }

    /// Get a program by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_program(&self, program_id: Uuid) -> AppResult<Option<Program>> {
        let mut conn = self.acquire().await?;
        get(&mut conn, program_id).await
    }

    /// Get a program with its ordered workouts
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_program_with_workouts(
        &self,
        program_id: Uuid,
    ) -> AppResult<Option<ProgramWithWorkouts>> {
        let mut conn = self.acquire().await?;
        get_with_workouts(&mut conn, program_id).await
    }

    /// Get the workouts of a program in program order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_program_workouts(&self, program_id: Uuid) -> AppResult<Vec<Workout>> {
        let mut conn = self.acquire().await?;
        get_workouts(&mut conn, program_id).await
    }

    /// List all programs ordered by title
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_programs(&self) -> AppResult<Vec<Program>> {
        let query = format!("SELECT {PROGRAM_COLUMNS} FROM programs ORDER BY title, id");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list programs: {e}")))?;

        rows.iter().map(row_to_program).collect()
    }
}

fn row_to_program(row: &SqliteRow) -> AppResult<Program> {
    Ok(Program {
        id: get_uuid(row, "id")?,
        title: get_string(row, "title")?,
        description: get_optional_string(row, "description")?,
        difficulty: Difficulty::parse(&get_string(row, "difficulty")?),
        duration: get_u32(row, "duration")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
