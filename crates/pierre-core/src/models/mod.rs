// ABOUTME: Core data models for the Pierre workout planner
// ABOUTME: Re-exports workout shapes, intents, and stored user context records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Data structures shared by every stage of the plan synthesis pipeline.
//!
//! ## Core Models
//!
//! - `WorkoutShape`: canonical `{warmup, main, cooldown}` session
//! - `WorkoutItem`: one exercise line with optional prescription fields
//! - `Split`, `Modality`, `Phase`: closed vocabularies used for control flow
//! - `Intent`: classified request with extracted slots
//! - `UserProfile`, `CatalogExercise`, `SessionRecord`: store records

mod intent;
mod user;
mod workout;

pub use intent::{Intent, IntentKind};
pub use user::{CatalogExercise, SessionRecord, TrainingLevel, UserProfile};
pub use workout::{
    AccessoryPoolEntry, Modality, Phase, Quantity, Split, WorkoutItem, WorkoutShape,
};
