// ABOUTME: User account model with profile and fitness preferences
// ABOUTME: Created at registration and mutated only by profile edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, WorkoutType};

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login email, unique across users
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Self-reported fitness level
    pub fitness_level: Option<Difficulty>,
    /// Free-form goal ("lose weight", "run a 10k")
    pub fitness_goal: Option<String>,
    /// Preferred kind of workout
    pub preferred_workout_type: Option<WorkoutType>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and no preferences
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            fitness_level: None,
            fitness_goal: None,
            preferred_workout_type: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    /// New display name
    pub display_name: Option<String>,
    /// New fitness level
    pub fitness_level: Option<Difficulty>,
    /// New goal
    pub fitness_goal: Option<String>,
    /// New preferred workout type
    pub preferred_workout_type: Option<WorkoutType>,
}
