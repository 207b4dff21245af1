// ABOUTME: Reusable workout definitions with difficulty and type classification
// ABOUTME: Workouts are immutable templates referenced by programs and schedules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty level for workouts, programs and user fitness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Suitable for beginners with no prior experience
    #[default]
    Beginner,
    /// Requires a training base
    Intermediate,
    /// For experienced athletes
    Advanced,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            // Default to Beginner for unrecognized values
            _ => Self::Beginner,
        }
    }
}

/// Kind of training a workout targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Resistance training
    Strength,
    /// Steady-state aerobic work
    Cardio,
    /// High-intensity interval training
    Hiit,
    /// Stretching
    Flexibility,
    /// Joint mobility and control
    Mobility,
    /// Long aerobic sessions
    Endurance,
    /// Anything else
    #[default]
    Other,
}

impl WorkoutType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Hiit => "hiit",
            Self::Flexibility => "flexibility",
            Self::Mobility => "mobility",
            Self::Endurance => "endurance",
            Self::Other => "other",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "strength" => Self::Strength,
            "cardio" => Self::Cardio,
            "hiit" => Self::Hiit,
            "flexibility" => Self::Flexibility,
            "mobility" => Self::Mobility,
            "endurance" => Self::Endurance,
            _ => Self::Other,
        }
    }
}

/// A reusable workout definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Kind of workout
    pub workout_type: WorkoutType,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new workout definition with a fresh id
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        duration_minutes: u32,
        difficulty: Difficulty,
        workout_type: WorkoutType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            duration_minutes,
            difficulty,
            workout_type,
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

/// Filter options for listing workouts
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    /// Filter by difficulty
    pub difficulty: Option<Difficulty>,
    /// Filter by type
    pub workout_type: Option<WorkoutType>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_parse_falls_back_to_other() {
        assert_eq!(WorkoutType::parse("HIIT"), WorkoutType::Hiit);
        assert_eq!(WorkoutType::parse("pilates"), WorkoutType::Other);
    }

    #[test]
    fn test_difficulty_round_trips_through_db_string() {
        for difficulty in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ] {
            assert_eq!(Difficulty::parse(difficulty.as_str()), difficulty);
        }
    }
}
