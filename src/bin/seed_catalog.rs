// ABOUTME: Workout catalog seeding utility for the FitTrack server
// ABOUTME: Creates a demo set of workouts and multi-day programs built from them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed the catalog (uses DATABASE_URL from environment)
//! cargo run --bin seed-catalog
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/fittrack.db
//!
//! # Seed even if programs already exist
//! cargo run --bin seed-catalog -- --force
//! ```

use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use fittrack_server::config::environment::DEFAULT_DATABASE_URL;
use fittrack_server::config::DatabaseUrl;
use fittrack_server::database::Database;
use fittrack_server::models::{Difficulty, Program, Workout, WorkoutType};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "FitTrack demo catalog seeder",
    long_about = "Create demo workouts and programs for local development"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Seed even if programs already exist
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Catalog workout definition
struct SeedWorkout {
    key: &'static str,
    title: &'static str,
    description: &'static str,
    duration_minutes: u32,
    difficulty: Difficulty,
    workout_type: WorkoutType,
}

/// Catalog program definition; workouts are referenced by key in program order
struct SeedProgram {
    title: &'static str,
    description: &'static str,
    duration: u32,
    difficulty: Difficulty,
    workouts: &'static [&'static str],
}

const WORKOUTS: &[SeedWorkout] = &[
    SeedWorkout {
        key: "full-body",
        title: "Full Body Basics",
        description: "Squats, push-ups, rows and planks in three rounds",
        duration_minutes: 30,
        difficulty: Difficulty::Beginner,
        workout_type: WorkoutType::Strength,
    },
    SeedWorkout {
        key: "brisk-walk",
        title: "Brisk Walk Intervals",
        description: "Alternate three minutes brisk with two minutes easy",
        duration_minutes: 25,
        difficulty: Difficulty::Beginner,
        workout_type: WorkoutType::Cardio,
    },
    SeedWorkout {
        key: "mobility-flow",
        title: "Morning Mobility Flow",
        description: "Hips, thoracic spine and ankles through controlled ranges",
        duration_minutes: 15,
        difficulty: Difficulty::Beginner,
        workout_type: WorkoutType::Mobility,
    },
    SeedWorkout {
        key: "tabata",
        title: "Tabata Burner",
        description: "Eight rounds of 20 seconds on, 10 seconds off, four blocks",
        duration_minutes: 20,
        difficulty: Difficulty::Intermediate,
        workout_type: WorkoutType::Hiit,
    },
    SeedWorkout {
        key: "upper-push",
        title: "Upper Body Push",
        description: "Bench press, overhead press and dips",
        duration_minutes: 45,
        difficulty: Difficulty::Intermediate,
        workout_type: WorkoutType::Strength,
    },
    SeedWorkout {
        key: "lower-power",
        title: "Lower Body Power",
        description: "Jump squats, deadlifts and walking lunges",
        duration_minutes: 45,
        difficulty: Difficulty::Advanced,
        workout_type: WorkoutType::Strength,
    },
    SeedWorkout {
        key: "long-run",
        title: "Long Easy Run",
        description: "Conversational pace, 60 to 90 minutes",
        duration_minutes: 75,
        difficulty: Difficulty::Intermediate,
        workout_type: WorkoutType::Endurance,
    },
    SeedWorkout {
        key: "stretch",
        title: "Full Body Stretch",
        description: "Static holds for the major muscle groups",
        duration_minutes: 20,
        difficulty: Difficulty::Beginner,
        workout_type: WorkoutType::Flexibility,
    },
];

const PROGRAMS: &[SeedProgram] = &[
    SeedProgram {
        title: "Getting Started",
        description: "Two weeks of alternating strength, cardio and mobility",
        duration: 5,
        difficulty: Difficulty::Beginner,
        workouts: &["full-body", "brisk-walk", "mobility-flow"],
    },
    SeedProgram {
        title: "Strength Builder",
        description: "Push and power sessions with stretching in between",
        duration: 10,
        difficulty: Difficulty::Intermediate,
        workouts: &["upper-push", "stretch", "lower-power"],
    },
    SeedProgram {
        title: "Conditioning Block",
        description: "High intensity intervals balanced by long aerobic work",
        duration: 8,
        difficulty: Difficulty::Advanced,
        workouts: &["tabata", "long-run"],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== FitTrack Catalog Seeder ===");

    let database_url = DatabaseUrl::parse_url(
        &args
            .database_url
            .or_else(|| env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
    );

    if let DatabaseUrl::SQLite { path } = &database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url.to_connection_string()).await?;

    let existing = database.list_programs().await?;
    if !existing.is_empty() && !args.force {
        info!(
            "Catalog already seeded ({} programs found). Use --force to seed again.",
            existing.len()
        );
        return Ok(());
    }

    let workout_ids = seed_workouts(&database).await?;
    let program_count = seed_programs(&database, &workout_ids).await?;

    info!("");
    info!("=== Seeding Complete ===");
    info!(
        "Created {} workouts and {} programs",
        workout_ids.len(),
        program_count
    );

    Ok(())
}

async fn seed_workouts(database: &Database) -> Result<HashMap<&'static str, Uuid>> {
    let mut ids = HashMap::with_capacity(WORKOUTS.len());

    for seed in WORKOUTS {
        let workout = Workout::new(
            seed.title,
            seed.duration_minutes,
            seed.difficulty,
            seed.workout_type,
        )
        .with_description(seed.description);
        database.create_workout(&workout).await?;
        info!("  ✓ {}", seed.title);
        ids.insert(seed.key, workout.id);
    }

    Ok(ids)
}

async fn seed_programs(database: &Database, workout_ids: &HashMap<&str, Uuid>) -> Result<u32> {
    let mut created = 0u32;

    for seed in PROGRAMS {
        let ordered: Vec<Uuid> = seed
            .workouts
            .iter()
            .map(|key| {
                workout_ids
                    .get(key)
                    .copied()
                    .with_context(|| format!("Program {} references unknown workout {key}", seed.title))
            })
            .collect::<Result<_>>()?;

        let program =
            Program::new(seed.title, seed.duration, seed.difficulty).with_description(seed.description);
        database.create_program(&program, &ordered).await?;
        info!("  ✓ {} ({} days)", seed.title, seed.duration);
        created += 1;
    }

    Ok(created)
}
