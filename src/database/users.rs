// ABOUTME: User account database operations
// ABOUTME: Handles registration lookups and profile edits

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{get_optional_string, get_string, get_timestamp, get_uuid};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, User, UserProfileUpdate, WorkoutType};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, display_name, password_hash, fitness_level, \
                            fitness_goal, preferred_workout_type, created_at, updated_at";

impl Database {
    /// Create users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                fitness_level TEXT CHECK (fitness_level IN ('beginner', 'intermediate', 'advanced')),
                fitness_goal TEXT,
                preferred_workout_type TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        ])
        .await
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already registered
    /// - Database operation fails
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Email {} is already registered",
                user.email
            )));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, fitness_level,
                               fitness_goal, preferred_workout_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.fitness_level.map(|d| d.as_str()))
        .bind(&user.fitness_goal)
        .bind(user.preferred_workout_type.map(|t| t.as_str()))
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Apply a partial profile update and return the stored user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user does not exist
    /// - Database operation fails
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: &UserProfileUpdate,
    ) -> AppResult<User> {
        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if let Some(display_name) = &update.display_name {
            user.display_name = Some(display_name.clone());
        }
        if let Some(level) = update.fitness_level {
            user.fitness_level = Some(level);
        }
        if let Some(goal) = &update.fitness_goal {
            user.fitness_goal = Some(goal.clone());
        }
        if let Some(kind) = update.preferred_workout_type {
            user.preferred_workout_type = Some(kind);
        }
        user.updated_at = Utc::now();

        sqlx::query(
            r"
            UPDATE users SET
                display_name = $1,
                fitness_level = $2,
                fitness_goal = $3,
                preferred_workout_type = $4,
                updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(&user.display_name)
        .bind(user.fitness_level.map(|d| d.as_str()))
        .bind(&user.fitness_goal)
        .bind(user.preferred_workout_type.map(|t| t.as_str()))
        .bind(user.updated_at.to_rfc3339())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update user profile: {e}")))?;

        Ok(user)
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: get_uuid(row, "id")?,
        email: get_string(row, "email")?,
        display_name: get_optional_string(row, "display_name")?,
        password_hash: get_string(row, "password_hash")?,
        fitness_level: get_optional_string(row, "fitness_level")?
            .map(|s| Difficulty::parse(&s)),
        fitness_goal: get_optional_string(row, "fitness_goal")?,
        preferred_workout_type: get_optional_string(row, "preferred_workout_type")?
            .map(|s| WorkoutType::parse(&s)),
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
