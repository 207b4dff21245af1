// ABOUTME: Domain service layer holding the scheduling and completion business rules
// ABOUTME: Route handlers stay thin and delegate every multi-step operation here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services own the rules the store deliberately does not: ownership checks,
//! one-active-program, completion idempotence and program-day advancement. Each
//! multi-row operation runs inside a single transaction.

/// Completion toggle, history append, program progress and unsubscribe
pub mod completion;

/// Program expansion into scheduled workouts and calendar reads
pub mod scheduling;

/// Derived statistics computed on read
pub mod statistics;

pub use completion::{CompletionOutcome, CompletionReconciler};
pub use scheduling::{ProgramAssignment, ScheduleRequest, SchedulingEngine, SchedulingPolicy};
