// ABOUTME: Core data models for the FitTrack server
// ABOUTME: Re-exports users, workouts, programs, schedules, and progress records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data carried between the store, the services and the routes.
//!
//! ## Identity
//!
//! A [`Workout`] is a reusable template. A [`ScheduledWorkout`] is one dated
//! occurrence of a template for one user, and completion state always belongs to
//! the occurrence. Two scheduled rows may share a `workout_id`; they never share
//! completion state.

mod program;
mod progress;
mod schedule;
mod user;
mod workout;

pub use program::{Program, ProgramWithWorkouts, ProgressUpdate, UserProgram};
pub use progress::{Favorite, ProgressTest, Statistics};
pub use schedule::{CompletedWorkout, ScheduledWorkout};
pub use user::{User, UserProfileUpdate};
pub use workout::{Difficulty, Workout, WorkoutFilter, WorkoutType};
