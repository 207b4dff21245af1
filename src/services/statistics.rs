// ABOUTME: Derived user statistics computed on read from completion history and progress tests
// ABOUTME: Nothing here is persisted; the streak is recomputed from completion dates each call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::Statistics;

/// Consecutive days with at least one completion, ending today or yesterday
///
/// A streak that last saw activity the day before yesterday is broken.
#[must_use]
pub fn current_streak(completion_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = completion_dates.iter().copied().collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

/// Compute a user's statistics
///
/// # Errors
///
/// Returns an error if any underlying query fails
pub async fn compute_statistics(database: &Database, user_id: Uuid) -> AppResult<Statistics> {
    let completed_workouts = database.count_completed_workouts(user_id).await?;
    let dates = database.completion_dates(user_id).await?;
    let progress_tests = database.count_progress_tests(user_id).await?;

    Ok(Statistics {
        completed_workouts,
        current_streak: current_streak(&dates, Utc::now().date_naive()),
        progress_tests,
    })
}
