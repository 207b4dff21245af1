// ABOUTME: System-wide constants re-exported from the fittrack-core crate
// ABOUTME: Scheduling policy defaults, list limits, auth settings, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module

pub use fittrack_core::constants::*;
