// ABOUTME: SQLite-backed domain store for users, catalog, schedules, and progress records
// ABOUTME: Owns the connection pool, schema migrations, and transaction entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Domain Store
//!
//! Typed CRUD and filtered reads over every persisted entity. Business rules live
//! in [`crate::services`]; this layer never decides whether a write is allowed.
//!
//! Each entity module exposes two flavours of the same operation:
//!
//! - connection-scoped free functions (`scheduled_workouts::insert(conn, ..)`) that
//!   services call inside a [`SqliteTransactionGuard`] to build atomic units
//! - pool-scoped methods on [`Database`] for single reads and writes
//!
//! Lookups return `Ok(None)` when the row does not exist, so callers can tell
//! "not found" apart from a failed query.

/// Completion history (append-only)
pub mod completed_workouts;
/// User-to-workout bookmarks
pub mod favorites;
/// Row to model conversion helpers
pub mod mappers;
/// Program definitions and their ordered workouts
pub mod programs;
/// Calendar-dated workout occurrences
pub mod scheduled_workouts;
/// Transaction guard with rollback on drop
pub mod transactions;
/// Program assignments and progress cursors
pub mod user_programs;
/// User accounts and profiles
pub mod users;
/// Workout catalog
pub mod workouts;

pub use transactions::SqliteTransactionGuard;

use crate::errors::{AppError, AppResult};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// Database manager for all domain tables
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// `sqlite::memory:` is served by a single long-lived connection so every
    /// query sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let is_memory = database_url.contains(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(in_memory = is_memory, "Database initialized");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a pooled connection for connection-scoped store functions
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is exhausted or closed
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))
    }

    /// Begin a transaction that rolls back unless committed
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be acquired
    pub async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(SqliteTransactionGuard::new(tx))
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Order matters: referenced tables first
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        self.migrate_programs().await?;
        self.migrate_user_programs().await?;
        self.migrate_scheduled_workouts().await?;
        self.migrate_completed_workouts().await?;
        self.migrate_favorites().await?;
        self.migrate_progress_tests().await?;

        debug!("Database migrations complete");
        Ok(())
    }

    /// Execute a list of DDL statements
    async fn execute_ddl(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}
