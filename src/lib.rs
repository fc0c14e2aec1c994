// ABOUTME: Main library entry point for the Pierre workout planner
// ABOUTME: Turns free-text training requests into validated, normalized workout plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Planner
//!
//! Plan synthesis pipeline that accepts a user's free-text request ("45 min
//! legs with kettlebells"), classifies it, asks a generative model for a
//! session, and returns a validated, normalized workout.
//!
//! ## Features
//!
//! - **Intent classification**: keyword heuristics with a model-backed router
//!   for ambiguous ordinal references
//! - **Quick entry**: `set,reps,weight` triplets logged without a model call
//! - **Response repair**: JSON recovered from prose and markdown fences
//! - **Normalization**: direct and phased plan shapes reconciled into one
//!   `{warmup, main, cooldown}` shape with exactly one primary lift
//! - **Training rules**: disallowed main lifts replaced per split and equipment
//! - **Accessory rotation**: accessories shuffled away from the last session's
//!
//! ## Architecture
//!
//! - **`planner`**: the individual pipeline stages
//! - **`services`**: [`services::PlanAssembler`] sequencing the stages
//! - **`llm`**: provider abstraction with Groq and OpenAI-compatible backends
//! - **`store`**: persistence collaborator with an in-memory implementation
//! - **`config`** and **`logging`**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pierre_workout_planner::config::PlannerConfig;
//! use pierre_workout_planner::errors::AppResult;
//! use pierre_workout_planner::llm::ChatProvider;
//! use pierre_workout_planner::services::{PlanAssembler, PlanRequest};
//! use pierre_workout_planner::store::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PlannerConfig::from_env()?;
//!     let provider = ChatProvider::from_config(&config.llm)?;
//!     let assembler = PlanAssembler::new(
//!         Arc::new(provider),
//!         Arc::new(InMemoryStore::demo()),
//!         config,
//!     );
//!
//!     let reply = assembler
//!         .handle(&PlanRequest::new("demo", "make me a 40 min legs workout"))
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&reply).unwrap_or_default());
//!     Ok(())
//! }
//! ```

/// Environment-driven planner configuration
pub mod config;

/// Unified error handling re-exported from `pierre-core`
pub mod errors;

/// Generative model providers
pub mod llm;

/// Structured logging setup and pipeline events
pub mod logging;

/// Plan synthesis pipeline stages
pub mod planner;

/// Request orchestration
pub mod services;

/// Persistence collaborator
pub mod store;
