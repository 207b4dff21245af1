// ABOUTME: Shared server resources built once at startup and handed to every route
// ABOUTME: Bundles the store, token manager, configuration, and the domain services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::services::{CompletionReconciler, SchedulingEngine, SchedulingPolicy};

/// Dependencies shared by all request handlers through axum state
#[derive(Clone)]
pub struct ServerResources {
    /// Domain store
    pub database: Database,
    /// Token issuing and validation
    pub auth_manager: AuthManager,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Program expansion and calendar reads
    pub scheduling: SchedulingEngine,
    /// Completion toggles and program progress
    pub completion: CompletionReconciler,
}

impl ServerResources {
    /// Wire services to the store using the configured scheduling policy
    ///
    /// # Errors
    ///
    /// Returns an error if the configured schedule interval is out of range
    pub fn new(database: Database, config: ServerConfig) -> AppResult<Self> {
        let policy = SchedulingPolicy::new(config.schedule_interval_days)?;
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );

        Ok(Self {
            scheduling: SchedulingEngine::new(database.clone(), policy),
            completion: CompletionReconciler::new(database.clone()),
            database,
            auth_manager,
            config: Arc::new(config),
        })
    }
}
