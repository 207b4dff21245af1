// ABOUTME: Completion reconciler for scheduled workouts and program progress
// ABOUTME: Toggles completion by scheduled row id, appends history, and advances the program cursor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Completion Reconciler
//!
//! A scheduled workout moves between `Scheduled` and `Completed`. Every transition
//! to `Completed` appends one `CompletedWorkout`; repeating a request for the state
//! the row is already in changes nothing. When the completed row belongs to the
//! user's active program, the program cursor moves forward:
//!
//! | completed day vs cursor | effect |
//! |---|---|
//! | equal | cursor + 1 |
//! | ahead | cursor jumps to the completed day |
//! | behind | none |
//!
//! Completing the final day from either advancing branch finishes the program.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{completed_workouts, programs, scheduled_workouts, user_programs, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{CompletedWorkout, ProgressUpdate, ScheduledWorkout, UserProgram};

/// How a completion moves a program cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Completed day is behind the cursor
    Unchanged,
    /// Cursor moves to the given day
    Advanced(u32),
    /// Final day completed; cursor moves past the end
    Finished(u32),
}

/// Decide how completing `program_day` moves a cursor sitting on `current_day`
#[must_use]
pub const fn advance_cursor(current_day: u32, program_day: u32, duration: u32) -> CursorMove {
    if program_day < current_day {
        CursorMove::Unchanged
    } else if program_day >= duration {
        CursorMove::Finished(program_day.saturating_add(1))
    } else if program_day == current_day {
        CursorMove::Advanced(current_day + 1)
    } else {
        CursorMove::Advanced(program_day)
    }
}

/// Result of a completion toggle
#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    /// The scheduled workout after the toggle
    pub updated_workout: ScheduledWorkout,
    /// History row appended by this call, if it completed the workout
    pub completed_workout: Option<CompletedWorkout>,
    /// The active assignment the workout belongs to, after any advancement
    pub user_program: Option<UserProgram>,
}

/// Applies completion toggles and program progress changes
#[derive(Clone)]
pub struct CompletionReconciler {
    database: Database,
}

impl CompletionReconciler {
    /// Create a reconciler over the given store
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Set the completion state of one scheduled workout
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the row does not exist or belongs to another
    /// user, or a database error if any write fails; nothing is persisted then
    pub async fn set_completion(
        &self,
        scheduled_workout_id: Uuid,
        user_id: Uuid,
        is_completed: bool,
    ) -> AppResult<CompletionOutcome> {
        let mut guard = self.database.begin().await?;

        let mut scheduled =
            scheduled_workouts::get_for_user(guard.executor()?, scheduled_workout_id, user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Scheduled workout"))?;

        let now = Utc::now();
        let transitioned =
            scheduled_workouts::mark_completed(guard.executor()?, scheduled.id, is_completed, now)
                .await?;

        if !transitioned {
            guard.commit().await?;
            debug!(
                scheduled_workout_id = %scheduled.id,
                is_completed,
                "Completion state already set"
            );
            return Ok(CompletionOutcome {
                updated_workout: scheduled,
                completed_workout: None,
                user_program: None,
            });
        }

        scheduled.is_completed = is_completed;
        scheduled.updated_at = now;

        if !is_completed {
            guard.commit().await?;
            info!(
                user_id = %user_id,
                scheduled_workout_id = %scheduled.id,
                "Workout marked incomplete"
            );
            return Ok(CompletionOutcome {
                updated_workout: scheduled,
                completed_workout: None,
                user_program: None,
            });
        }

        let completed = CompletedWorkout::for_occurrence(&scheduled, now);
        completed_workouts::insert(guard.executor()?, &completed).await?;

        let user_program = match (scheduled.program_id, scheduled.program_day) {
            (Some(program_id), Some(program_day)) => {
                advance_program(guard.executor()?, user_id, program_id, program_day, now).await?
            }
            _ => None,
        };

        guard.commit().await?;

        info!(
            user_id = %user_id,
            scheduled_workout_id = %scheduled.id,
            workout_id = %scheduled.workout_id,
            completed_workout_id = %completed.id,
            "Workout completed"
        );

        Ok(CompletionOutcome {
            updated_workout: scheduled,
            completed_workout: Some(completed),
            user_program,
        })
    }

    /// Apply an explicit progress patch to an assignment owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The assignment does not exist or belongs to another user
    /// - `current_day` is zero
    /// - Re-activating would give the user a second active program
    pub async fn update_program_progress(
        &self,
        user_program_id: Uuid,
        user_id: Uuid,
        update: ProgressUpdate,
    ) -> AppResult<UserProgram> {
        if update.current_day == Some(0) {
            return Err(AppError::out_of_range("current_day must be at least 1"));
        }

        let mut guard = self.database.begin().await?;
        let mut assignment = load_owned(guard.executor()?, user_program_id, user_id).await?;

        if update.is_empty() {
            guard.commit().await?;
            return Ok(assignment);
        }

        if update.is_active == Some(true) && !assignment.is_active {
            if let Some(active) =
                user_programs::get_active_for_user(guard.executor()?, user_id).await?
            {
                return Err(AppError::conflict(format!(
                    "User already has an active program ({})",
                    active.program_id
                )));
            }
            assignment.unsubscribed_at = None;
        }

        if let Some(current_day) = update.current_day {
            assignment.current_day = current_day;
        }
        if let Some(is_active) = update.is_active {
            assignment.is_active = is_active;
        }
        if let Some(completed_at) = update.completed_at {
            assignment.completed_at = Some(completed_at);
        }

        user_programs::update(guard.executor()?, &assignment).await?;
        guard.commit().await?;

        info!(
            user_id = %user_id,
            user_program_id = %assignment.id,
            current_day = assignment.current_day,
            is_active = assignment.is_active,
            "Program progress updated"
        );
        Ok(assignment)
    }

    /// Leave a program; ownership is checked before anything is written
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the assignment does not exist or belongs to
    /// another user
    pub async fn unsubscribe(&self, user_program_id: Uuid, user_id: Uuid) -> AppResult<UserProgram> {
        let mut guard = self.database.begin().await?;
        let mut assignment = load_owned(guard.executor()?, user_program_id, user_id).await?;

        if !assignment.is_active {
            guard.commit().await?;
            return Ok(assignment);
        }

        assignment.is_active = false;
        assignment.unsubscribed_at = Some(Utc::now());
        user_programs::update(guard.executor()?, &assignment).await?;
        guard.commit().await?;

        info!(
            user_id = %user_id,
            user_program_id = %assignment.id,
            program_id = %assignment.program_id,
            current_day = assignment.current_day,
            "Unsubscribed from program"
        );
        Ok(assignment)
    }
}

/// Load an assignment, collapsing missing and foreign-owned into not-found
async fn load_owned(
    conn: &mut SqliteConnection,
    user_program_id: Uuid,
    user_id: Uuid,
) -> AppResult<UserProgram> {
    user_programs::get(conn, user_program_id)
        .await?
        .filter(|assignment| assignment.user_id == user_id)
        .ok_or_else(|| AppError::not_found("User program"))
}

/// Move the active assignment for `program_id` after `program_day` was completed
async fn advance_program(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    program_id: Uuid,
    program_day: u32,
    now: DateTime<Utc>,
) -> AppResult<Option<UserProgram>> {
    let Some(mut assignment) =
        user_programs::get_active_for_program(&mut *conn, user_id, program_id).await?
    else {
        return Ok(None);
    };

    let program = programs::get(&mut *conn, program_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Program {program_id}")))?;

    match advance_cursor(assignment.current_day, program_day, program.duration) {
        CursorMove::Unchanged => return Ok(Some(assignment)),
        CursorMove::Advanced(day) => assignment.current_day = day,
        CursorMove::Finished(day) => {
            assignment.current_day = day;
            assignment.is_active = false;
            assignment.completed_at = Some(now);
        }
    }

    user_programs::update(conn, &assignment).await?;

    info!(
        user_id = %user_id,
        user_program_id = %assignment.id,
        program_day,
        current_day = assignment.current_day,
        finished = !assignment.is_active,
        "Program advanced"
    );
    Ok(Some(assignment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completing_current_day_advances_by_one() {
        assert_eq!(advance_cursor(1, 1, 5), CursorMove::Advanced(2));
    }

    #[test]
    fn test_completing_future_day_jumps_to_it() {
        assert_eq!(advance_cursor(2, 4, 5), CursorMove::Advanced(4));
    }

    #[test]
    fn test_completing_past_day_keeps_cursor() {
        assert_eq!(advance_cursor(4, 2, 5), CursorMove::Unchanged);
    }

    #[test]
    fn test_completing_final_day_finishes() {
        assert_eq!(advance_cursor(5, 5, 5), CursorMove::Finished(6));
        assert_eq!(advance_cursor(2, 5, 5), CursorMove::Finished(6));
    }

    #[test]
    fn test_cursor_never_decreases() {
        for current in 1..=6 {
            for day in 1..=6 {
                let next = match advance_cursor(current, day, 5) {
                    CursorMove::Unchanged => current,
                    CursorMove::Advanced(d) | CursorMove::Finished(d) => d,
                };
                assert!(next >= current, "{current} -> {next} on day {day}");
            }
        }
    }
}
