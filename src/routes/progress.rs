// ABOUTME: Progress route handlers for fitness assessments, completion history, and statistics
// ABOUTME: Records assessment results and reports derived counts and streaks for the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::authenticate;
use crate::constants::limits::MAX_LIST_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::models::{CompletedWorkout, ProgressTest};
use crate::resources::ServerResources;
use crate::services::statistics::compute_statistics;

/// Body for recording an assessment
#[derive(Debug, Deserialize)]
pub struct RecordProgressTestRequest {
    /// Assessment name, e.g. `pushups`
    pub test_type: String,
    /// Measured value
    pub result: f64,
    /// Unit of the value
    pub unit: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl RecordProgressTestRequest {
    fn into_progress_test(self, user_id: Uuid) -> AppResult<ProgressTest> {
        let test_type = self.test_type.trim().to_owned();
        if test_type.is_empty() {
            return Err(AppError::missing_field("test_type"));
        }
        if !self.result.is_finite() {
            return Err(AppError::invalid_input("result must be a finite number"));
        }

        Ok(ProgressTest {
            id: Uuid::new_v4(),
            user_id,
            test_type,
            result: self.result,
            unit: self.unit.filter(|u| !u.trim().is_empty()),
            notes: self.notes,
            recorded_at: Utc::now(),
        })
    }
}

/// Query for listing assessments
#[derive(Debug, Deserialize)]
pub struct ProgressTestsQuery {
    /// Only this assessment type
    pub test_type: Option<String>,
}

/// Query for completion history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum rows to return
    pub limit: Option<u32>,
}

/// Assessments list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressTestsResponse {
    /// Assessments, newest first
    pub progress_tests: Vec<ProgressTest>,
    /// Number of assessments returned
    pub total: usize,
}

/// Completion history response
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletedWorkoutsResponse {
    /// Completion records, newest first
    pub completed_workouts: Vec<CompletedWorkout>,
    /// Number of records returned
    pub total: usize,
}

/// Progress routes implementation
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create progress, history, and statistics routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/progress-tests",
                get(Self::handle_list_tests).post(Self::handle_record_test),
            )
            .route("/api/completed-workouts", get(Self::handle_history))
            .route("/api/statistics", get(Self::handle_statistics))
            .with_state(resources)
    }

    async fn handle_record_test(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecordProgressTestRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let test = body.into_progress_test(auth.user_id)?;

        resources.database.insert_progress_test(&test).await?;
        info!(
            user_id = %auth.user_id,
            test_type = %test.test_type,
            "Progress test recorded"
        );

        Ok((StatusCode::CREATED, Json(test)).into_response())
    }

    async fn handle_list_tests(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ProgressTestsQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let test_type = query.test_type.as_deref().map(str::trim).filter(|t| !t.is_empty());

        let progress_tests = resources
            .database
            .list_progress_tests(auth.user_id, test_type)
            .await?;
        let response = ProgressTestsResponse {
            total: progress_tests.len(),
            progress_tests,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let limit = query.limit.map(|l| l.clamp(1, MAX_LIST_LIMIT));

        let completed_workouts = resources
            .database
            .list_completed_workouts(auth.user_id, limit)
            .await?;
        let response = CompletedWorkoutsResponse {
            total: completed_workouts.len(),
            completed_workouts,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_statistics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let statistics = compute_statistics(&resources.database, auth.user_id).await?;

        Ok((StatusCode::OK, Json(statistics)).into_response())
    }
}
