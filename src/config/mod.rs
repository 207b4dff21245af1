// ABOUTME: Configuration management module for server settings loaded at startup
// ABOUTME: Re-exports the environment-driven ServerConfig and its parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the FitTrack server

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseUrl, Environment, ServerConfig};
