// ABOUTME: Scheduling engine that expands program assignments into dated workout occurrences
// ABOUTME: Also inserts ad hoc occurrences and serves the calendar date and range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scheduling Engine
//!
//! Program day `d` (1-based) is served by `workouts[(d - 1) % len]` and dated
//! `start + (d - 1) * interval_days`. The workout list cycles; the program-day
//! counter never repeats. Assignment writes the `UserProgram` and every
//! `ScheduledWorkout` in a single transaction.

use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::limits::MAX_PROGRAM_DURATION_DAYS;
use crate::constants::scheduling::{DEFAULT_INTERVAL_DAYS, MAX_INTERVAL_DAYS, MAX_RANGE_DAYS};
use crate::database::{programs, scheduled_workouts, user_programs, workouts, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ScheduledWorkout, UserProgram};

/// Calendar spacing between consecutive program days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingPolicy {
    interval_days: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            interval_days: DEFAULT_INTERVAL_DAYS,
        }
    }
}

impl SchedulingPolicy {
    /// Create a policy spacing program days `interval_days` apart
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or above the supported maximum
    pub fn new(interval_days: u32) -> AppResult<Self> {
        if interval_days == 0 || interval_days > MAX_INTERVAL_DAYS {
            return Err(AppError::out_of_range(format!(
                "Schedule interval must be between 1 and {MAX_INTERVAL_DAYS} days, got {interval_days}"
            )));
        }
        Ok(Self { interval_days })
    }

    /// Days between consecutive program days
    #[must_use]
    pub const fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// Calendar date of `program_day` for a program started on `start`
    ///
    /// # Errors
    ///
    /// Returns an error if `program_day` is zero or the date overflows the calendar
    pub fn date_for_day(&self, start: NaiveDate, program_day: u32) -> AppResult<NaiveDate> {
        let offset = program_day
            .checked_sub(1)
            .ok_or_else(|| AppError::out_of_range("Program days start at 1"))?;
        let days = u64::from(offset) * u64::from(self.interval_days);
        start
            .checked_add_days(Days::new(days))
            .ok_or_else(|| AppError::out_of_range("Scheduled date is out of range"))
    }
}

/// One program day of an expanded plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDay {
    /// 1-based program day
    pub program_day: u32,
    /// Workout served on that day
    pub workout_id: Uuid,
    /// Calendar date the day lands on
    pub scheduled_date: NaiveDate,
}

/// Expand a program into one planned day per program day
///
/// # Errors
///
/// Returns an error if there are no workouts, the duration is zero or too long,
/// or a date falls outside the calendar
pub fn build_day_plan(
    workout_ids: &[Uuid],
    duration: u32,
    start: NaiveDate,
    policy: SchedulingPolicy,
) -> AppResult<Vec<PlannedDay>> {
    if workout_ids.is_empty() {
        return Err(AppError::invalid_input("Program has no workouts"));
    }
    if duration == 0 {
        return Err(AppError::invalid_input(
            "Program duration must be at least one day",
        ));
    }
    if duration > MAX_PROGRAM_DURATION_DAYS {
        return Err(AppError::out_of_range(format!(
            "Program duration may not exceed {MAX_PROGRAM_DURATION_DAYS} days"
        )));
    }

    (1..=duration)
        .zip(workout_ids.iter().cycle())
        .map(|(program_day, workout_id)| {
            Ok(PlannedDay {
                program_day,
                workout_id: *workout_id,
                scheduled_date: policy.date_for_day(start, program_day)?,
            })
        })
        .collect()
}

/// Result of assigning a program
#[derive(Debug, Clone, Serialize)]
pub struct ProgramAssignment {
    /// The new active assignment
    pub user_program: UserProgram,
    /// One occurrence per program day, ordered by program day
    pub scheduled_workouts: Vec<ScheduledWorkout>,
}

/// Ad hoc scheduling request
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Owning user
    pub user_id: Uuid,
    /// Workout to schedule
    pub workout_id: Uuid,
    /// Target date
    pub scheduled_date: NaiveDate,
    /// Program the occurrence belongs to
    pub program_id: Option<Uuid>,
    /// Program day the occurrence represents; requires `program_id`
    pub program_day: Option<u32>,
}

/// Expands program assignments and inserts scheduled workouts
#[derive(Clone)]
pub struct SchedulingEngine {
    database: Database,
    policy: SchedulingPolicy,
}

impl SchedulingEngine {
    /// Create an engine over the given store
    #[must_use]
    pub const fn new(database: Database, policy: SchedulingPolicy) -> Self {
        Self { database, policy }
    }

    /// The spacing policy in effect
    #[must_use]
    pub const fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Assign a program starting today (UTC)
    ///
    /// # Errors
    ///
    /// See [`Self::assign_program_starting`]
    pub async fn assign_program(
        &self,
        user_id: Uuid,
        program_id: Uuid,
    ) -> AppResult<ProgramAssignment> {
        self.assign_program_starting(user_id, program_id, Utc::now().date_naive())
            .await
    }

    /// Assign a program whose first day lands on `start_date`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The program does not exist
    /// - The program has no workouts or a zero duration
    /// - The user already has an active program
    /// - Any write fails, in which case nothing is persisted
    pub async fn assign_program_starting(
        &self,
        user_id: Uuid,
        program_id: Uuid,
        start_date: NaiveDate,
    ) -> AppResult<ProgramAssignment> {
        let mut guard = self.database.begin().await?;

        let program = programs::get_with_workouts(guard.executor()?, program_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Program {program_id}")))?;

        let workout_ids: Vec<Uuid> = program.workouts.iter().map(|w| w.id).collect();
        let plan = build_day_plan(
            &workout_ids,
            program.program.duration,
            start_date,
            self.policy,
        )?;

        if let Some(active) = user_programs::get_active_for_user(guard.executor()?, user_id).await?
        {
            return Err(AppError::conflict(format!(
                "User already has an active program ({})",
                active.program_id
            )));
        }

        let user_program = UserProgram::start(user_id, program_id, Utc::now());
        user_programs::insert(guard.executor()?, &user_program).await?;

        let mut scheduled = Vec::with_capacity(plan.len());
        for day in plan {
            let occurrence = ScheduledWorkout::new(
                user_id,
                day.workout_id,
                day.scheduled_date,
                Some(program_id),
                Some(day.program_day),
            );
            scheduled_workouts::insert(guard.executor()?, &occurrence).await?;
            scheduled.push(occurrence);
        }

        guard.commit().await?;

        info!(
            user_id = %user_id,
            program_id = %program_id,
            user_program_id = %user_program.id,
            days = scheduled.len(),
            interval_days = self.policy.interval_days(),
            "Program assigned"
        );

        Ok(ProgramAssignment {
            user_program,
            scheduled_workouts: scheduled,
        })
    }

    /// Insert one ad hoc occurrence
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - `program_day` is given without `program_id`, is zero, or is past the
    ///   program's duration
    /// - The workout or program does not exist
    pub async fn schedule_workout(&self, request: ScheduleRequest) -> AppResult<ScheduledWorkout> {
        match (request.program_id, request.program_day) {
            (None, Some(_)) => return Err(AppError::missing_field("program_id")),
            (_, Some(0)) => return Err(AppError::out_of_range("program_day must be at least 1")),
            _ => {}
        }

        let mut conn = self.database.acquire().await?;
        if workouts::get(&mut conn, request.workout_id).await?.is_none() {
            return Err(AppError::invalid_input(format!(
                "Workout {} does not exist",
                request.workout_id
            )));
        }
        if let Some(program_id) = request.program_id {
            let Some(program) = programs::get(&mut conn, program_id).await? else {
                return Err(AppError::invalid_input(format!(
                    "Program {program_id} does not exist"
                )));
            };
            if let Some(day) = request.program_day.filter(|day| *day > program.duration) {
                return Err(AppError::out_of_range(format!(
                    "program_day {day} is past the program's {} days",
                    program.duration
                )));
            }
        }

        let occurrence = ScheduledWorkout::new(
            request.user_id,
            request.workout_id,
            request.scheduled_date,
            request.program_id,
            request.program_day,
        );
        scheduled_workouts::insert(&mut conn, &occurrence).await?;

        debug!(
            user_id = %occurrence.user_id,
            scheduled_workout_id = %occurrence.id,
            scheduled_date = %occurrence.scheduled_date,
            "Workout scheduled"
        );
        Ok(occurrence)
    }

    /// A user's occurrences on one date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_scheduled_by_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        self.database
            .get_scheduled_workouts_by_date(user_id, date)
            .await
    }

    /// A user's occurrences between two dates, both inclusive
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start` is after `end` or the span exceeds
    /// the supported maximum, or a database error if the query fails
    pub async fn list_scheduled_by_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "Range start {start} is after end {end}"
            )));
        }
        if (end - start).num_days() > MAX_RANGE_DAYS {
            return Err(AppError::out_of_range(format!(
                "Range may span at most {MAX_RANGE_DAYS} days"
            )));
        }
        self.database
            .get_scheduled_workouts_by_date_range(user_id, start, end)
            .await
    }
}
