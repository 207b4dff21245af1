// ABOUTME: Route module organization for FitTrack HTTP endpoints
// ABOUTME: Groups routes by domain and holds the shared bearer-token and input parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the FitTrack server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the store or the services. Input coercion (ids, dates) happens
//! here so the services only ever see typed values.

/// Registration and login routes
pub mod auth;
/// Favorite workout routes
pub mod favorites;
/// Health check and readiness routes
pub mod health;
/// Current user profile routes
pub mod profile;
/// Program catalog and assignment routes
pub mod programs;
/// Progress tests, completion history, and statistics routes
pub mod progress;
/// Scheduled workout and completion routes
pub mod schedule;
/// Program assignment management routes
pub mod user_programs;
/// Workout catalog routes
pub mod workouts;

pub use auth::AuthRoutes;
pub use favorites::FavoriteRoutes;
pub use health::HealthRoutes;
pub use profile::ProfileRoutes;
pub use programs::ProgramRoutes;
pub use progress::ProgressRoutes;
pub use schedule::ScheduleRoutes;
pub use user_programs::UserProgramRoutes;
pub use workouts::WorkoutRoutes;

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::mappers::DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Caller identity resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: Uuid,
    /// Email claim
    pub email: String,
}

/// Resolve the caller from the `Authorization: Bearer` header
///
/// # Errors
///
/// Returns an auth error if the header is missing, not a bearer token, or the
/// token fails validation
pub fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthenticatedUser> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::auth_invalid("Authorization header must be a Bearer token"))?;

    let claims = resources.auth_manager.validate_token(token)?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id()?,
        email: claims.email,
    })
}

/// Parse a path or query id
///
/// # Errors
///
/// Returns a format error naming `field` if `raw` is not a UUID
pub fn parse_uuid(raw: &str, field: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::invalid_format(format!("{field} must be a UUID, got '{raw}'")))
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns a format error naming `field` if `raw` is not a calendar date
pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::invalid_format(format!("{field} must be a YYYY-MM-DD date, got '{raw}'"))
    })
}
