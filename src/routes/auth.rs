// ABOUTME: User registration and login route handlers
// ABOUTME: Hashes passwords with bcrypt and issues JWT bearer tokens on success
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! Registration validates the email shape and password length, stores a bcrypt
//! hash, and returns a token straight away. Login answers the same error for an
//! unknown email and a wrong password.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::constants::auth::MIN_PASSWORD_LENGTH;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Plain-text password, at least the minimum length
    pub password: String,
    /// Optional display name
    pub display_name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id
    pub user_id: String,
    /// Normalized email
    pub email: String,
    /// Display name, if set
    pub display_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Token issued by registration and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for `Authorization` headers
    pub jwt_token: String,
    /// Token expiry, RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Registration and login logic, independent of the HTTP layer
#[derive(Clone)]
pub struct AuthService {
    database: Database,
    auth_manager: AuthManager,
}

impl AuthService {
    #[must_use]
    pub const fn new(database: Database, auth_manager: AuthManager) -> Self {
        Self {
            database,
            auth_manager,
        }
    }

    /// Register a user and issue a token
    ///
    /// # Errors
    /// Returns error if the email or password is invalid, the email is taken, or
    /// hashing or the insert fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);
        info!("User registration attempt for email: {email}");

        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(request.password).await?;
        let display_name = request
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        let user = User::new(email, password_hash, display_name);

        self.database.create_user(&user).await?;
        AppLogger::log_auth_event(&user.email, "register", true);

        self.issue(&user)
    }

    /// Check credentials and issue a token
    ///
    /// # Errors
    /// Returns an invalid-credentials error for an unknown email or a wrong
    /// password
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.database.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            warn!("Invalid password for user: {email}");
            AppLogger::log_auth_event(&email, "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        AppLogger::log_auth_event(&email, "login", true);
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        let jwt_token = self.auth_manager.generate_token(user)?;
        let expires_at =
            chrono::Utc::now() + chrono::Duration::hours(self.auth_manager.token_expiry_hours());

        Ok(AuthResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo::from(user),
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.') && !domain_part.starts_with('.') && !domain_part.ends_with('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= MIN_PASSWORD_LENGTH
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create registration and login routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    fn service(resources: &ServerResources) -> AuthService {
        AuthService::new(resources.database.clone(), resources.auth_manager.clone())
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
