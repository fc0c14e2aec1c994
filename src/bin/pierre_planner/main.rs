// ABOUTME: Pierre planner CLI - runs the plan synthesis pipeline from the terminal
// ABOUTME: Generates plans, inspects intent classification, and parses quick-entry set logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a plan for the demo user against the configured model
//! pierre-planner plan --user-id demo --message "45 min legs with kettlebells" --seed-demo
//!
//! # Log three sets of back squat
//! pierre-planner plan --user-id demo --message "1,5,225;2,5,230;3,4,230" --exercise "Back Squat"
//!
//! # Show how a message is classified (no model call)
//! pierre-planner classify "make me a 30 minute dumbbell push session"
//!
//! # Parse a quick-entry line
//! pierre-planner quick-entry "1,5,225;2,5,230"
//!
//! # Check that the configured LLM provider answers
//! pierre-planner health
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pierre_workout_planner::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "pierre-planner",
    about = "Pierre Workout Planner CLI",
    long_about = "Turns free-text training requests into validated workout plans using the configured LLM provider."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline for one request and print the reply as JSON
    Plan {
        /// Requesting user id
        #[arg(long)]
        user_id: String,

        /// Free-text request
        #[arg(long)]
        message: String,

        /// Split hint (push, pull, legs, upper, full, hiit)
        #[arg(long)]
        split: Option<String>,

        /// Session length hint in minutes
        #[arg(long)]
        minutes: Option<u32>,

        /// Style hint passed to the prompt
        #[arg(long)]
        style: Option<String>,

        /// Exercise the quick-entry sets belong to
        #[arg(long)]
        exercise: Option<String>,

        /// Load the demo profile, equipment, and exercise catalog
        #[arg(long)]
        seed_demo: bool,
    },

    /// Print the heuristic intent for a message as JSON
    Classify {
        /// Message to classify
        text: String,
    },

    /// Parse a quick-entry line and print the entries as JSON
    QuickEntry {
        /// `set,reps,weight` triplets separated by `;`
        text: String,
    },

    /// Check the configured LLM provider and print its health as JSON
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    match cli.command {
        Command::Plan {
            user_id,
            message,
            split,
            minutes,
            style,
            exercise,
            seed_demo,
        } => {
            let request = commands::plan::PlanArgs {
                user_id,
                message,
                split,
                minutes,
                style,
                exercise,
                seed_demo,
            };
            commands::plan::run(request).await?;
        }
        Command::Classify { text } => commands::inspect::classify(&text)?,
        Command::QuickEntry { text } => commands::inspect::quick_entry(&text)?,
        Command::Health => commands::health::run().await?,
    }

    Ok(())
}
