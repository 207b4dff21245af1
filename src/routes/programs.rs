// ABOUTME: Program catalog and assignment route handlers
// ABOUTME: Lists programs, shows a program with its ordered workouts, and assigns it to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_date, parse_uuid};
use crate::errors::AppError;
use crate::models::Program;
use crate::resources::ServerResources;

/// Programs list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgramsListResponse {
    /// Programs in the catalog
    pub programs: Vec<Program>,
    /// Number of programs returned
    pub total: usize,
}

/// Optional body for an assignment; the first day defaults to today (UTC)
#[derive(Debug, Default, Deserialize)]
pub struct AssignProgramRequest {
    /// First program day, `YYYY-MM-DD`; defaults to today
    pub start_date: Option<String>,
}

/// Program routes implementation
pub struct ProgramRoutes;

impl ProgramRoutes {
    /// Create program routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/programs", get(Self::handle_list))
            .route("/api/programs/:id", get(Self::handle_get))
            .route("/api/programs/:id/assign", post(Self::handle_assign))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let programs = resources.database.list_programs().await?;
        let response = ProgramsListResponse {
            total: programs.len(),
            programs,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let program_id = parse_uuid(&id, "program id")?;

        let program = resources
            .database
            .get_program_with_workouts(program_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Program {program_id}")))?;

        Ok((StatusCode::OK, Json(program)).into_response())
    }

    async fn handle_assign(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        body: Option<Json<AssignProgramRequest>>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let program_id = parse_uuid(&id, "program id")?;
        let request = body.map(|Json(request)| request).unwrap_or_default();

        let assignment = match request.start_date.as_deref() {
            Some(raw) => {
                let start = parse_date(raw, "start_date")?;
                resources
                    .scheduling
                    .assign_program_starting(auth.user_id, program_id, start)
                    .await?
            }
            None => {
                resources
                    .scheduling
                    .assign_program(auth.user_id, program_id)
                    .await?
            }
        };

        Ok((StatusCode::CREATED, Json(assignment)).into_response())
    }
}
