// ABOUTME: Unified error handling re-exported from the fittrack-core crate
// ABOUTME: Every layer returns AppResult so axum can render failures as JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error codes, `AppError`, and the JSON error envelope live in
//! `fittrack-core` so the domain models and the server share one vocabulary.

pub use fittrack_core::errors::*;
