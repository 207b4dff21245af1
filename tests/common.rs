// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, users, catalog fixtures, and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fittrack_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::NaiveDate;
use fittrack_server::{
    config::{AuthConfig, DatabaseUrl, Environment, ServerConfig},
    database::Database,
    models::{Difficulty, Program, User, Workout, WorkoutType},
    resources::ServerResources,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Signing secret shared by test resources
pub const TEST_JWT_SECRET: &str = "fittrack-test-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Create a user without going through bcrypt
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let user = User::new(email.to_owned(), "not-a-real-hash".into(), None);
    database.create_user(&user).await?;
    Ok(user)
}

/// Create a catalog workout
pub async fn create_test_workout(database: &Database, title: &str) -> Result<Workout> {
    let workout = Workout::new(title, 30, Difficulty::Beginner, WorkoutType::Strength);
    database.create_workout(&workout).await?;
    Ok(workout)
}

/// Create a program over the given workouts, in order
pub async fn create_test_program(
    database: &Database,
    title: &str,
    duration: u32,
    workouts: &[&Workout],
) -> Result<Program> {
    let program = Program::new(title, duration, Difficulty::Beginner);
    let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
    database.create_program(&program, &ids).await?;
    Ok(program)
}

/// Configuration for tests: in-memory store, fixed secret, default spacing
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".into(),
        database_url: DatabaseUrl::Memory,
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.into(),
            jwt_secret_generated: false,
            jwt_expiry_hours: 1,
        },
        schedule_interval_days: 3,
        cors_origins: vec!["*".into()],
        request_timeout_secs: 30,
        environment: Environment::Testing,
    }
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(database, test_config())?))
}

/// Shorthand for calendar dates in assertions
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
