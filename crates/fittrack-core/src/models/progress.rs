// ABOUTME: Favorites, fitness assessment results, and derived user statistics
// ABOUTME: Progress tests are append-only; statistics are computed on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-to-workout bookmark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    /// Owning user
    pub user_id: Uuid,
    /// Bookmarked workout
    pub workout_id: Uuid,
    /// When the bookmark was added
    pub created_at: DateTime<Utc>,
}

/// Result of a fitness assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressTest {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Kind of test ("pushups_max", "mile_run")
    pub test_type: String,
    /// Measured value
    pub result: f64,
    /// Unit of the measured value
    pub unit: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the test was taken
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate statistics derived from completion history and progress tests
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    /// Distinct workout occurrences completed
    pub completed_workouts: u32,
    /// Consecutive days with at least one completion, ending today or yesterday
    pub current_streak: u32,
    /// Number of progress tests recorded
    pub progress_tests: u32,
}
