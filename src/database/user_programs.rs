// ABOUTME: Program assignment database operations
// ABOUTME: A partial unique index keeps at most one active assignment per user

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{flag, get_bool, get_optional_timestamp, get_timestamp, get_u32, get_uuid};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::UserProgram;
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use uuid::Uuid;

const USER_PROGRAM_COLUMNS: &str =
    "id, user_id, program_id, current_day, is_active, started_at, completed_at, unsubscribed_at";

/// Insert a new assignment
///
/// # Errors
///
/// Returns a conflict error if the user already has an active assignment,
/// or a database error if the insert fails
pub async fn insert(conn: &mut SqliteConnection, assignment: &UserProgram) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO user_programs (id, user_id, program_id, current_day, is_active,
                                   started_at, completed_at, unsubscribed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(assignment.id.to_string())
    .bind(assignment.user_id.to_string())
    .bind(assignment.program_id.to_string())
    .bind(i64::from(assignment.current_day))
    .bind(flag(assignment.is_active))
    .bind(assignment.started_at.to_rfc3339())
    .bind(assignment.completed_at.map(|t| t.to_rfc3339()))
    .bind(assignment.unsubscribed_at.map(|t| t.to_rfc3339()))
    .execute(conn)
    .await
    .map_err(map_active_conflict)?;
    Ok(())
}

/// Look up an assignment by id
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get(
    conn: &mut SqliteConnection,
    user_program_id: Uuid,
) -> AppResult<Option<UserProgram>> {
    let query = format!("SELECT {USER_PROGRAM_COLUMNS} FROM user_programs WHERE id = $1");
    let row = sqlx::query(&query)
        .bind(user_program_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user program: {e}")))?;

    row.as_ref().map(row_to_user_program).transpose()
}

/// The user's active assignment, if any
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get_active_for_user(
    conn: &mut SqliteConnection,
    user_id: Uuid,
) -> AppResult<Option<UserProgram>> {
    let query = format!(
        "SELECT {USER_PROGRAM_COLUMNS} FROM user_programs WHERE user_id = $1 AND is_active = 1"
    );
    let row = sqlx::query(&query)
        .bind(user_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get active user program: {e}")))?;

    row.as_ref().map(row_to_user_program).transpose()
}

/// The user's active assignment for a specific program, if any
///
/// # Errors
///
/// Returns an error if the query or row decoding fails
pub async fn get_active_for_program(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    program_id: Uuid,
) -> AppResult<Option<UserProgram>> {
    let query = format!(
        "SELECT {USER_PROGRAM_COLUMNS} FROM user_programs \
         WHERE user_id = $1 AND program_id = $2 AND is_active = 1"
    );
    let row = sqlx::query(&query)
        .bind(user_id.to_string())
        .bind(program_id.to_string())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get active user program: {e}")))?;

    row.as_ref().map(row_to_user_program).transpose()
}

/// Persist the mutable fields of an assignment
///
/// # Errors
///
/// Returns a conflict error if re-activation would give the user a second active
/// assignment, or a database error if the update fails
pub async fn update(conn: &mut SqliteConnection, assignment: &UserProgram) -> AppResult<()> {
    sqlx::query(
        r"
        UPDATE user_programs SET
            current_day = $1,
            is_active = $2,
            completed_at = $3,
            unsubscribed_at = $4
        WHERE id = $5
        ",
    )
    .bind(i64::from(assignment.current_day))
    .bind(flag(assignment.is_active))
    .bind(assignment.completed_at.map(|t| t.to_rfc3339()))
    .bind(assignment.unsubscribed_at.map(|t| t.to_rfc3339()))
    .bind(assignment.id.to_string())
    .execute(conn)
    .await
    .map_err(map_active_conflict)?;
    Ok(())
}

fn map_active_conflict(error: sqlx::Error) -> AppError {
    let is_unique_violation = error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation());
    if is_unique_violation {
        AppError::conflict("User already has an active program")
    } else {
        AppError::database(format!("Failed to write user program: {error}"))
    }
}

impl Database {
    /// Create user_programs table
    pub(super) async fn migrate_user_programs(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS user_programs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                program_id TEXT NOT NULL REFERENCES programs(id),
                current_day INTEGER NOT NULL CHECK (current_day >= 1),
                is_active INTEGER NOT NULL DEFAULT 1,
                started_at TEXT NOT NULL,
                completed_at TEXT,
                unsubscribed_at TEXT
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_user_programs_user ON user_programs(user_id)",
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_user_programs_one_active
            ON user_programs(user_id) WHERE is_active = 1
            ",
        ])
        .await
    }

    /// Insert an assignment
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the user already has an active assignment
    pub async fn insert_user_program(&self, assignment: &UserProgram) -> AppResult<()> {
        let mut conn = self.acquire().await?;
        insert(&mut conn, assignment).await
    }

    /// Persist the mutable fields of an assignment
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the write would leave two active assignments
    pub async fn update_user_program(&self, assignment: &UserProgram) -> AppResult<()> {
        let mut conn = self.acquire().await?;
        update(&mut conn, assignment).await
    }

    /// Get an assignment by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_program(&self, user_program_id: Uuid) -> AppResult<Option<UserProgram>> {
        let mut conn = self.acquire().await?;
        get(&mut conn, user_program_id).await
    }

    /// Get the user's active assignment
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_active_user_program(&self, user_id: Uuid) -> AppResult<Option<UserProgram>> {
        let mut conn = self.acquire().await?;
        get_active_for_user(&mut conn, user_id).await
    }

    /// All of a user's assignments, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_user_programs(&self, user_id: Uuid) -> AppResult<Vec<UserProgram>> {
        let query = format!(
            "SELECT {USER_PROGRAM_COLUMNS} FROM user_programs \
             WHERE user_id = $1 ORDER BY started_at DESC, id"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list user programs: {e}")))?;

        rows.iter().map(row_to_user_program).collect()
    }
}

fn row_to_user_program(row: &SqliteRow) -> AppResult<UserProgram> {
    Ok(UserProgram {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        program_id: get_uuid(row, "program_id")?,
        current_day: get_u32(row, "current_day")?,
        is_active: get_bool(row, "is_active")?,
        started_at: get_timestamp(row, "started_at")?,
        completed_at: get_optional_timestamp(row, "completed_at")?,
        unsubscribed_at: get_optional_timestamp(row, "unsubscribed_at")?,
    })
}
