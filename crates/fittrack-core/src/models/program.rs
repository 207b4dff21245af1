// ABOUTME: Training programs and per-user program assignments with a progress cursor
// ABOUTME: A user holds at most one active assignment; inactive ones are kept as history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, Workout};

/// A named, fixed-duration sequence of workouts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Overall difficulty
    pub difficulty: Difficulty,
    /// Number of program days
    pub duration: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Program {
    /// Create a new program definition with a fresh id
    #[must_use]
    pub fn new(title: impl Into<String>, duration: u32, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            difficulty,
            duration,
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A program together with its workouts in program order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramWithWorkouts {
    /// The program
    #[serde(flatten)]
    pub program: Program,
    /// Workouts in the order they are cycled through
    pub workouts: Vec<Workout>,
}

/// One user's assignment to one program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProgram {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Assigned program
    pub program_id: Uuid,
    /// Next program day the user is expected to complete (1-based)
    pub current_day: u32,
    /// Whether this is the user's running assignment
    pub is_active: bool,
    /// When the program was assigned
    pub started_at: DateTime<Utc>,
    /// Set when the final day was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Set when the user left the program
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl UserProgram {
    /// Start a fresh assignment at day 1
    #[must_use]
    pub fn start(user_id: Uuid, program_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            program_id,
            current_day: 1,
            is_active: true,
            started_at,
            completed_at: None,
            unsubscribed_at: None,
        }
    }
}

/// Explicit progress patch; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// New cursor value
    pub current_day: Option<u32>,
    /// New active flag
    pub is_active: Option<bool>,
    /// New completion timestamp
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressUpdate {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_day.is_none() && self.is_active.is_none() && self.completed_at.is_none()
    }
}
