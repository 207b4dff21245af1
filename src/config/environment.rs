// ABOUTME: Environment-based server configuration for the FitTrack HTTP server
// ABOUTME: Reads listen address, database URL, auth, scheduling policy, and HTTP limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::generate_jwt_secret;
use crate::constants::auth::DEFAULT_JWT_EXPIRY_HOURS;
use crate::constants::scheduling::{DEFAULT_INTERVAL_DAYS, MAX_INTERVAL_DAYS};

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fittrack.db";
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Live deployment; secrets must be configured explicitly
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str.trim_start_matches("//")),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Whether the secret was generated because `JWT_SECRET` was unset
    pub jwt_secret_generated: bool,
    /// Token lifetime
    pub jwt_expiry_hours: i64,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Token signing
    pub auth: AuthConfig,
    /// Calendar days between consecutive program days
    pub schedule_interval_days: u32,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let (jwt_secret, jwt_secret_generated) = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => (secret, false),
            _ => (generate_jwt_secret(), true),
        };

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", DEFAULT_HOST),
            database_url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
            auth: AuthConfig {
                jwt_secret,
                jwt_secret_generated,
                jwt_expiry_hours: env_var_or("JWT_EXPIRY_HOURS", &DEFAULT_JWT_EXPIRY_HOURS.to_string())
                    .parse()
                    .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            schedule_interval_days: env_var_or(
                "SCHEDULE_INTERVAL_DAYS",
                &DEFAULT_INTERVAL_DAYS.to_string(),
            )
            .parse()
            .context("Invalid SCHEDULE_INTERVAL_DAYS value")?,
            cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            environment,
        };

        config.validate()?;
        if config.auth.jwt_secret_generated {
            warn!("JWT_SECRET not set; generated a per-process secret, tokens will not survive a restart");
        }
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the interval or token lifetime is out of range, or a
    /// production deployment has no explicit signing secret
    pub fn validate(&self) -> Result<()> {
        if self.schedule_interval_days == 0 || self.schedule_interval_days > MAX_INTERVAL_DAYS {
            return Err(anyhow::anyhow!(
                "SCHEDULE_INTERVAL_DAYS must be between 1 and {MAX_INTERVAL_DAYS}, got {}",
                self.schedule_interval_days
            ));
        }

        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.environment.is_production() && self.auth.jwt_secret_generated {
            return Err(anyhow::anyhow!("JWT_SECRET must be set in production"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be positive"));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitTrack Server Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - Token Expiry: {}h\n\
             - Schedule Interval: {} days\n\
             - CORS Origins: {}\n\
             - Request Timeout: {}s",
            self.host,
            self.http_port,
            self.environment,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            if self.auth.jwt_secret_generated {
                "Generated"
            } else {
                "Configured"
            },
            self.auth.jwt_expiry_hours,
            self.schedule_interval_days,
            self.cors_origins.join(", "),
            self.request_timeout_secs
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
