// ABOUTME: Favorite workout route handlers
// ABOUTME: Lists, adds, and removes the caller's favorite workouts
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
use tracing::debug;

use super::{authenticate, parse_uuid};
use crate::errors::AppError;
use crate::models::Favorite;
use crate::resources::ServerResources;

/// Favorites list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesListResponse {
    /// Favorited workouts, newest first
    pub favorites: Vec<Favorite>,
    /// Number of favorites returned
    pub total: usize,
}

/// Result of adding or removing a favorite
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteChangeResponse {
    /// Workout the change applied to
    pub workout_id: String,
    /// Favorite state after the change
    pub is_favorite: bool,
}

/// Favorite routes implementation
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create favorite routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/favorites", get(Self::handle_list))
            .route(
                "/api/favorites/:workout_id",
                post(Self::handle_add).delete(Self::handle_remove),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let favorites = resources.database.list_favorites(auth.user_id).await?;
        let response = FavoritesListResponse {
            total: favorites.len(),
            favorites,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let workout_id = parse_uuid(&workout_id, "workout_id")?;

        if resources.database.get_workout(workout_id).await?.is_none() {
            return Err(AppError::not_found(format!("Workout {workout_id}")));
        }

        let inserted = resources
            .database
            .add_favorite(auth.user_id, workout_id)
            .await?;
        debug!(user_id = %auth.user_id, workout_id = %workout_id, inserted, "Favorite added");

        let status = if inserted {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        let response = FavoriteChangeResponse {
            workout_id: workout_id.to_string(),
            is_favorite: true,
        };

        Ok((status, Json(response)).into_response())
    }

    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let workout_id = parse_uuid(&workout_id, "workout_id")?;

        if !resources
            .database
            .remove_favorite(auth.user_id, workout_id)
            .await?
        {
            return Err(AppError::not_found("Favorite"));
        }

        let response = FavoriteChangeResponse {
            workout_id: workout_id.to_string(),
            is_favorite: false,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
