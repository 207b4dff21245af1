// ABOUTME: Calendar-dated workout occurrences and the append-only completion history
// ABOUTME: Completion state is owned by the scheduled row id, never by the workout id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One occurrence of a workout on a calendar date for one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledWorkout {
    /// Unique identifier; the identity used for completion
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Workout template
    pub workout_id: Uuid,
    /// Calendar date the workout is planned for
    pub scheduled_date: NaiveDate,
    /// Completion flag
    pub is_completed: bool,
    /// Program this occurrence belongs to, if any
    pub program_id: Option<Uuid>,
    /// Program day this occurrence represents, if any
    pub program_day: Option<u32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last completion toggle
    pub updated_at: DateTime<Utc>,
}

impl ScheduledWorkout {
    /// Create a new, not yet completed occurrence
    #[must_use]
    pub fn new(
        user_id: Uuid,
        workout_id: Uuid,
        scheduled_date: NaiveDate,
        program_id: Option<Uuid>,
        program_day: Option<u32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            scheduled_date,
            is_completed: false,
            program_id,
            program_day,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Immutable record of one completion event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedWorkout {
    /// Unique identifier
    pub id: Uuid,
    /// User who completed the workout
    pub user_id: Uuid,
    /// Occurrence whose completion this records
    pub scheduled_workout_id: Uuid,
    /// Workout template completed
    pub workout_id: Uuid,
    /// Date of the occurrence that was completed; distinguishes repeats
    pub scheduled_date: Option<NaiveDate>,
    /// When the completion happened
    pub completed_at: DateTime<Utc>,
}

impl CompletedWorkout {
    /// Record a completion of the given occurrence
    #[must_use]
    pub fn for_occurrence(scheduled: &ScheduledWorkout, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: scheduled.user_id,
            scheduled_workout_id: scheduled.id,
            workout_id: scheduled.workout_id,
            scheduled_date: Some(scheduled.scheduled_date),
            completed_at,
        }
    }
}
