// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Issues HS256 bearer tokens at login and validates them on every API request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Tokens are HS256-signed JWTs carrying the user id in `sub`. Password hashing
//! uses bcrypt on the blocking thread pool so the runtime stays responsive.

use crate::constants::auth::GENERATED_SECRET_BYTES;
use crate::constants::service_names::FITTRACK_SERVER;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

impl Claims {
    /// Parse the subject as a user id
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a UUID
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))
    }
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            aud: FITTRACK_SERVER.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an expired error for tokens past `exp`, and an invalid error for
    /// bad signatures, wrong audience, or malformed tokens
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[FITTRACK_SERVER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> AppError {
        tracing::debug!("JWT token validation failed: {:?}", e);
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::auth_expired(),
            ErrorKind::InvalidSignature => AppError::auth_invalid("Token signature is invalid"),
            ErrorKind::InvalidAudience => AppError::auth_invalid("Token audience is invalid"),
            _ => AppError::auth_invalid("Token is malformed"),
        }
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Check a password against a stored bcrypt hash on the blocking pool
///
/// # Errors
///
/// Returns an error if the hash is malformed or the blocking task panics
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
}

/// Generate a random hex-encoded `JWT` secret
#[must_use]
pub fn generate_jwt_secret() -> String {
    let mut secret = [0u8; GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut secret);
    hex::encode(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("runner@example.com".into(), "hash".into(), None)
    }

    #[test]
    fn test_token_round_trip_carries_user_id() {
        let manager = AuthManager::new(b"test-secret", 1);
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = AuthManager::new(b"secret-a", 1);
        let verifier = AuthManager::new(b"secret-b", 1);
        let token = issuer.generate_token(&test_user()).unwrap();

        let err = verifier.validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let manager = AuthManager::new(b"test-secret", -2);
        let token = manager.generate_token(&test_user()).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthExpired);
    }

    #[test]
    fn test_generated_secret_is_hex() {
        let secret = generate_jwt_secret();
        assert_eq!(secret.len(), GENERATED_SECRET_BYTES * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_password_hash_verifies() {
        let hash = hash_password("correct horse".into()).await.unwrap();
        assert!(verify_password("correct horse".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".into(), hash).await.unwrap());
    }
}
