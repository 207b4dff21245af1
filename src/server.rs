// ABOUTME: HTTP server assembly that merges every route group and applies the middleware stack
// ABOUTME: Binds the listener and serves until ctrl-c or SIGTERM triggers graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::{create_request_span, setup_cors, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, FavoriteRoutes, HealthRoutes, ProfileRoutes, ProgramRoutes, ProgressRoutes,
    ScheduleRoutes, UserProgramRoutes, WorkoutRoutes,
};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(ProfileRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources.clone()))
        .merge(ProgramRoutes::routes(resources.clone()))
        .merge(UserProgramRoutes::routes(resources.clone()))
        .merge(ScheduleRoutes::routes(resources.clone()))
        .merge(FavoriteRoutes::routes(resources.clone()))
        .merge(ProgressRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    timeout,
                )),
        )
}

/// Bind the configured address and serve until shutdown
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or the
/// server fails while running
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .context("Invalid HOST/HTTP_PORT combination")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
