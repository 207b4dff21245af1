// ABOUTME: Core types and constants for the FitTrack workout scheduling server
// ABOUTME: Foundation crate with error handling, domain models, and scheduling constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitTrack Core
//!
//! Foundation crate providing shared types for the FitTrack server. It has no
//! knowledge of storage or transport, so it changes rarely and keeps incremental
//! builds of the server crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Users, workouts, programs, scheduled and completed workouts
//! - **constants**: Scheduling policy defaults and validation limits

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain data models shared by the store, services and routes
pub mod models;

/// Policy defaults and validation limits
pub mod constants;
