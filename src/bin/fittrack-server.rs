// ABOUTME: FitTrack HTTP server binary
// ABOUTME: Loads configuration, opens the SQLite store, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitTrack Server Binary
//!
//! Starts the workout scheduling API with bearer-token authentication and a
//! SQLite store.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fittrack_server::{
    config::{environment::ServerConfig, DatabaseUrl},
    database::Database,
    logging::LoggingConfig,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fittrack-server")]
#[command(about = "FitTrack - workout scheduling and progress tracking API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = DatabaseUrl::parse_url(&database_url);
    }

    info!("Starting FitTrack server");
    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    let resources = Arc::new(ServerResources::new(database, config)?);

    if let Err(e) = server::serve(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    info!("Server shut down cleanly");
    Ok(())
}
