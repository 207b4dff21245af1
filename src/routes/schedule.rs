// ABOUTME: Scheduled workout route handlers for the calendar and completion toggles
// ABOUTME: Parses dates and ids at the edge, then delegates to the scheduling and completion services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Schedule routes
//!
//! Completion is addressed by scheduled-workout id. Two occurrences of the same
//! workout on different dates are toggled independently.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_date, parse_uuid};
use crate::errors::AppError;
use crate::models::ScheduledWorkout;
use crate::resources::ServerResources;
use crate::services::ScheduleRequest;

/// Body for scheduling one workout
#[derive(Debug, Deserialize)]
pub struct ScheduleWorkoutRequest {
    /// Catalog workout to schedule
    pub workout_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub scheduled_date: String,
    /// Program the occurrence belongs to, if any
    pub program_id: Option<String>,
    /// 1-based program day; requires `program_id`
    pub program_day: Option<u32>,
}

/// Query for one calendar day
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

/// Query for an inclusive date range
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// First day, inclusive
    pub start: String,
    /// Last day, inclusive
    pub end: String,
}

/// Body for a completion toggle
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    /// Desired completion state
    pub is_completed: bool,
}

/// Scheduled workouts list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduledWorkoutsResponse {
    /// Occurrences ordered by date, then program day
    pub scheduled_workouts: Vec<ScheduledWorkout>,
    /// Number of occurrences returned
    pub total: usize,
}

impl From<Vec<ScheduledWorkout>> for ScheduledWorkoutsResponse {
    fn from(scheduled_workouts: Vec<ScheduledWorkout>) -> Self {
        Self {
            total: scheduled_workouts.len(),
            scheduled_workouts,
        }
    }
}

/// Schedule routes implementation
pub struct ScheduleRoutes;

impl ScheduleRoutes {
    /// Create schedule routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/schedule",
                get(Self::handle_list_by_date).post(Self::handle_schedule),
            )
            .route("/api/schedule/range", get(Self::handle_list_by_range))
            .route("/api/schedule/:id/completion", put(Self::handle_set_completion))
            .with_state(resources)
    }

    async fn handle_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<ScheduleWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let request = ScheduleRequest {
            user_id: auth.user_id,
            workout_id: parse_uuid(&body.workout_id, "workout_id")?,
            scheduled_date: parse_date(&body.scheduled_date, "scheduled_date")?,
            program_id: body
                .program_id
                .as_deref()
                .map(|raw| parse_uuid(raw, "program_id"))
                .transpose()?,
            program_day: body.program_day,
        };

        let scheduled = resources.scheduling.schedule_workout(request).await?;
        Ok((StatusCode::CREATED, Json(scheduled)).into_response())
    }

    async fn handle_list_by_date(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let date = parse_date(&query.date, "date")?;

        let scheduled = resources
            .scheduling
            .list_scheduled_by_date(auth.user_id, date)
            .await?;

        Ok((StatusCode::OK, Json(ScheduledWorkoutsResponse::from(scheduled))).into_response())
    }

    async fn handle_list_by_range(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let start = parse_date(&query.start, "start")?;
        let end = parse_date(&query.end, "end")?;

        let scheduled = resources
            .scheduling
            .list_scheduled_by_range(auth.user_id, start, end)
            .await?;

        Ok((StatusCode::OK, Json(ScheduledWorkoutsResponse::from(scheduled))).into_response())
    }

    async fn handle_set_completion(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<CompletionRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let scheduled_workout_id = parse_uuid(&id, "scheduled workout id")?;

        let outcome = resources
            .completion
            .set_completion(scheduled_workout_id, auth.user_id, body.is_completed)
            .await?;

        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
