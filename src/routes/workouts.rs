// ABOUTME: Workout catalog route handlers
// ABOUTME: Lists workouts with difficulty and type filters and fetches single workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, Workout, WorkoutFilter, WorkoutType};
use crate::resources::ServerResources;

/// Query parameters for listing workouts
#[derive(Debug, Default, Deserialize)]
pub struct ListWorkoutsQuery {
    /// Difficulty filter
    pub difficulty: Option<String>,
    /// Workout type filter
    pub workout_type: Option<String>,
    /// Maximum rows to return
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ListWorkoutsQuery {
    fn into_filter(self) -> AppResult<WorkoutFilter> {
        let difficulty = self
            .difficulty
            .as_deref()
            .map(|raw| {
                let parsed = Difficulty::parse(raw);
                if parsed.as_str() == raw.to_lowercase() {
                    Ok(parsed)
                } else {
                    Err(AppError::invalid_input(format!("Unknown difficulty '{raw}'")))
                }
            })
            .transpose()?;

        let workout_type = self
            .workout_type
            .as_deref()
            .map(|raw| {
                let parsed = WorkoutType::parse(raw);
                if parsed.as_str() == raw.to_lowercase() {
                    Ok(parsed)
                } else {
                    Err(AppError::invalid_input(format!("Unknown workout type '{raw}'")))
                }
            })
            .transpose()?;

        Ok(WorkoutFilter {
            difficulty,
            workout_type,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Workouts list response
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutsListResponse {
    /// Matching workouts
    pub workouts: Vec<Workout>,
    /// Number of workouts returned
    pub total: usize,
}

/// Single workout with the caller's favorite flag
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
    /// The workout, inlined
    #[serde(flatten)]
    pub workout: Workout,
    /// Whether the caller has favorited it
    pub is_favorite: bool,
}

/// Workout catalog routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create workout catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list))
            .route("/api/workouts/:id", get(Self::handle_get))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListWorkoutsQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let filter = query.into_filter()?;

        let workouts = resources.database.list_workouts(&filter).await?;
        let response = WorkoutsListResponse {
            total: workouts.len(),
            workouts,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let workout_id = parse_uuid(&id, "workout id")?;

        let workout = resources
            .database
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))?;
        let is_favorite = resources
            .database
            .is_favorite(auth.user_id, workout_id)
            .await?;

        Ok((StatusCode::OK, Json(WorkoutResponse { workout, is_favorite })).into_response())
    }
}
