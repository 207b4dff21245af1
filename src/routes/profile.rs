// ABOUTME: Current user profile route handlers
// ABOUTME: Reads and partially updates the authenticated user's preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::authenticate;
use crate::errors::AppError;
use crate::models::UserProfileUpdate;
use crate::resources::ServerResources;

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/me",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut update): Json<UserProfileUpdate>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        update.display_name = update.display_name.map(|name| name.trim().to_owned());
        if update.display_name.as_deref() == Some("") {
            return Err(AppError::invalid_input("display_name cannot be empty"));
        }

        let user = resources
            .database
            .update_user_profile(auth.user_id, &update)
            .await?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
