// ABOUTME: Program assignment management route handlers
// ABOUTME: Lists the caller's assignments, patches progress, and unsubscribes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{authenticate, parse_uuid};
use crate::errors::AppError;
use crate::models::{ProgressUpdate, UserProgram};
use crate::resources::ServerResources;

/// Assignment history response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProgramsListResponse {
    /// Every assignment, active or not
    pub user_programs: Vec<UserProgram>,
    /// Number of assignments returned
    pub total: usize,
}

/// The caller's active assignment, if any
#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveProgramResponse {
    /// The active assignment, if any
    pub user_program: Option<UserProgram>,
}

/// User program routes implementation
pub struct UserProgramRoutes;

impl UserProgramRoutes {
    /// Create user program routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/user-programs", get(Self::handle_list))
            .route("/api/user-programs/active", get(Self::handle_active))
            .route("/api/user-programs/:id", patch(Self::handle_update_progress))
            .route(
                "/api/user-programs/:id/unsubscribe",
                post(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let user_programs = resources.database.list_user_programs(auth.user_id).await?;
        let response = UserProgramsListResponse {
            total: user_programs.len(),
            user_programs,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_active(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let user_program = resources
            .database
            .get_active_user_program(auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(ActiveProgramResponse { user_program })).into_response())
    }

    async fn handle_update_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(update): Json<ProgressUpdate>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let user_program_id = parse_uuid(&id, "user program id")?;

        let user_program = resources
            .completion
            .update_program_progress(user_program_id, auth.user_id, update)
            .await?;

        Ok((StatusCode::OK, Json(user_program)).into_response())
    }

    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let user_program_id = parse_uuid(&id, "user program id")?;

        let user_program = resources
            .completion
            .unsubscribe(user_program_id, auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(user_program)).into_response())
    }
}
