// ABOUTME: Core types and constants for the Pierre workout planner
// ABOUTME: Foundation crate with error handling, workout/intent models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the workout plan
//! synthesis pipeline. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Planner-wide constants (duration bounds, rotation limits, env keys)
//! - **models**: Workout shapes, splits, modalities, intents, and user context records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`WorkoutShape`, `Split`, `Intent`, `UserProfile`, etc.)
pub mod models;
