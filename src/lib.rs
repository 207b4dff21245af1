// ABOUTME: Main library entry point for the FitTrack workout scheduling server
// ABOUTME: Exposes the store, scheduling and completion services, and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # FitTrack Server
//!
//! A backend for planning and tracking workouts. Users browse a workout
//! catalog, enroll in multi-day programs, and mark dated occurrences done.
//!
//! ## Architecture
//!
//! - **Database**: SQLite store behind connection-scoped functions and a
//!   `Database` facade, with transactions for multi-row writes
//! - **Services**: the scheduling engine expands programs into dated
//!   occurrences; the completion reconciler toggles completion, appends
//!   history, and advances program progress
//! - **Routes**: thin axum handlers with bearer-token authentication
//! - **Config**: environment-driven settings, including the spacing policy
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fittrack_server::config::environment::ServerConfig;
//! use fittrack_server::database::Database;
//! use fittrack_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database_url.to_connection_string()).await?;
//!     let resources = std::sync::Arc::new(ServerResources::new(database, config)?);
//!     fittrack_server::server::serve(resources).await
//! }
//! ```

/// JWT issuing and validation, password hashing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Policy defaults and validation limits
pub mod constants;

/// SQLite domain store
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Domain data models
pub mod models;

/// Shared server resources handed to every route
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Scheduling, completion, and statistics services
pub mod services;
