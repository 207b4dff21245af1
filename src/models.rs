// ABOUTME: Core data models re-exported from the fittrack-core crate
// ABOUTME: Users, workouts, programs, scheduled occurrences, and progress records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! See [`fittrack_core::models`] for the identity rules between workouts and
//! their scheduled occurrences.

pub use fittrack_core::models::*;
