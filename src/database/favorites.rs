// ABOUTME: Favorite workout database operations
// ABOUTME: One row per (user, workout) pair; adding twice is a no-op

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::mappers::{get_timestamp, get_uuid};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Favorite;
use chrono::Utc;
use uuid::Uuid;

impl Database {
    /// Create favorites table
    pub(super) async fn migrate_favorites(&self) -> AppResult<()> {
        self.execute_ddl(&[r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, workout_id)
            )
            "])
        .await
    }

    /// Bookmark a workout; returns `true` if a new row was written
    ///
    /// # Errors
    ///
    /// Returns an error if the workout does not exist or the insert fails
    pub async fn add_favorite(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO favorites (user_id, workout_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, workout_id) DO NOTHING
            ",
        )
        .bind(user_id.to_string())
        .bind(workout_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        Ok(result.rows_affected() == 1)
    }

    /// Remove a bookmark; returns `false` if there was nothing to remove
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn remove_favorite(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND workout_id = $2")
            .bind(user_id.to_string())
            .bind(workout_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a workout is bookmarked by the user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_favorite(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM favorites WHERE user_id = $1 AND workout_id = $2")
            .bind(user_id.to_string())
            .bind(workout_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check favorite: {e}")))?;

        Ok(row.is_some())
    }

    /// A user's bookmarks, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_favorites(&self, user_id: Uuid) -> AppResult<Vec<Favorite>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, workout_id, created_at FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC, workout_id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(Favorite {
                    user_id: get_uuid(row, "user_id")?,
                    workout_id: get_uuid(row, "workout_id")?,
                    created_at: get_timestamp(row, "created_at")?,
                })
            })
            .collect()
    }
}
