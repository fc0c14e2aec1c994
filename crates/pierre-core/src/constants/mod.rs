// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the Pierre workout planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Session duration bounds, rotation limits, and catalog tags
pub mod workout;

/// Environment variable names and defaults for planner configuration
pub mod env_config;

/// Service identifiers used in logs
pub mod service_names {
    /// Service name for the workout planner
    pub const PIERRE_WORKOUT_PLANNER: &str = "pierre-workout-planner";
}

pub use workout::*;
